use crate::adapters::database::UNIQUE_VIOLATION;
use crate::adapters::database::records::MessageRecord;
use crate::domain::message::{Message, MessagePatch, NewMessage};
use crate::error::{AppError, Result};
use sqlx::{PgConnection, Postgres, QueryBuilder};

#[derive(Clone, Debug, Default)]
pub struct MessageRepository {}

fn map_title_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AppError::Conflict("title already exists".into())
        }
        e => AppError::Database(e),
    }
}

impl MessageRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Fetches a message by primary key.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no row has this id.
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn get_by_id(&self, conn: &mut PgConnection, id: i32) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, title, text, owner_name, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        record.map(Into::into).ok_or(AppError::NotFound)
    }

    /// Inserts a new message. The database assigns `id` and `created_at`.
    ///
    /// # Errors
    /// Returns `AppError::Conflict` if the title is already taken.
    /// Returns `AppError::Database` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, message), fields(title = %message.title))]
    pub(crate) async fn insert(&self, conn: &mut PgConnection, message: &NewMessage) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (title, text, owner_name)
            VALUES ($1, $2, $3)
            RETURNING id, title, text, owner_name, created_at
            "#,
        )
        .bind(&message.title)
        .bind(&message.text)
        .bind(&message.owner_name)
        .fetch_one(conn)
        .await
        .map_err(map_title_conflict)?;

        Ok(record.into())
    }

    /// Applies the present fields of `patch` to the row. An empty patch touches nothing.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no row has this id.
    /// Returns `AppError::Conflict` if the new title is already taken.
    /// Returns `AppError::Database` if the update fails.
    #[tracing::instrument(level = "debug", skip(self, conn, patch))]
    pub(crate) async fn update(&self, conn: &mut PgConnection, id: i32, patch: &MessagePatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE messages SET ");
        let mut assignments = builder.separated(", ");
        for (column, value) in patch.changes() {
            assignments.push(column).push_unseparated(" = ").push_bind_unseparated(value);
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(conn).await.map_err(map_title_conflict)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Deletes a message.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no row has this id.
    /// Returns `AppError::Database` if the deletion fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn delete(&self, conn: &mut PgConnection, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1").bind(id).execute(conn).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
