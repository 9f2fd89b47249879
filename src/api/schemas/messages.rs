use crate::domain::message::Message;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub message_title: String,
    pub message_text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
}

impl From<Message> for MessageView {
    fn from(m: Message) -> Self {
        Self { message_title: m.title, message_text: m.text, creation_time: m.created_at }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePosted {
    pub status: String,
    pub id: i32,
    pub message_title: String,
    pub message_text: String,
}

impl From<Message> for MessagePosted {
    fn from(m: Message) -> Self {
        Self { status: "message posted".to_string(), id: m.id, message_title: m.title, message_text: m.text }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    #[must_use]
    pub fn new(status: &str) -> Self {
        Self { status: status.to_string() }
    }
}
