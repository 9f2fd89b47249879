use crate::domain::message::Message;
use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct MessageRecord {
    pub(crate) id: i32,
    pub(crate) title: String,
    pub(crate) text: String,
    pub(crate) owner_name: String,
    pub(crate) created_at: OffsetDateTime,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            text: record.text,
            owner_name: record.owner_name,
            created_at: record.created_at,
        }
    }
}
