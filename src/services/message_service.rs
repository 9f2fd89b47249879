use crate::adapters::database::DbPool;
use crate::adapters::database::message_repo::MessageRepository;
use crate::domain::message::{Message, MessagePatch, NewMessage};
use crate::error::Result;
use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) operations_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("bulletin-server");
        Self {
            operations_total: meter
                .u64_counter("bulletin_message_operations_total")
                .with_description("Message store operations by kind and outcome")
                .build(),
        }
    }

    fn record<T>(&self, operation: &'static str, result: &Result<T>) {
        let status = if result.is_ok() { "success" } else { "failure" };
        self.operations_total.add(1, &[KeyValue::new("operation", operation), KeyValue::new("status", status)]);
    }
}

/// Runs each message operation on its own pooled connection or transaction.
///
/// Connections go back to the pool when dropped, and uncommitted transactions
/// roll back, so every exit path releases what it acquired.
#[derive(Clone, Debug)]
pub struct MessageService {
    pool: DbPool,
    repo: MessageRepository,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(pool: DbPool, repo: MessageRepository) -> Self {
        Self { pool, repo, metrics: Metrics::new() }
    }

    /// Fetches a single message.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the message does not exist.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn get(&self, id: i32) -> Result<Message> {
        let result: Result<Message> = async {
            let mut conn = self.pool.acquire().await?;
            self.repo.get_by_id(&mut conn, id).await
        }
        .await;

        self.metrics.record("get", &result);
        result
    }

    /// Stores a new message.
    ///
    /// # Errors
    /// Returns `AppError::Conflict` if another message already uses the title.
    #[tracing::instrument(err(level = "warn"), skip(self, message), fields(message_id = tracing::field::Empty))]
    pub async fn create(&self, message: NewMessage) -> Result<Message> {
        let result: Result<Message> = async {
            let mut conn = self.pool.acquire().await?;
            self.repo.insert(&mut conn, &message).await
        }
        .await;

        self.metrics.record("create", &result);
        let created = result?;

        tracing::Span::current().record("message_id", created.id);
        tracing::info!("Message created");
        Ok(created)
    }

    /// Applies a partial update to an existing message.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the message does not exist.
    /// Returns `AppError::Conflict` if the new title is already taken.
    #[tracing::instrument(err(level = "warn"), skip(self, patch))]
    pub async fn update(&self, id: i32, patch: MessagePatch) -> Result<()> {
        let result: Result<()> = async {
            let mut tx = self.pool.begin().await?;
            self.repo.get_by_id(&mut tx, id).await?;
            self.repo.update(&mut tx, id, &patch).await?;
            tx.commit().await?;
            Ok(())
        }
        .await;

        self.metrics.record("update", &result);
        result
    }

    /// Permanently removes a message.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the message does not exist.
    #[tracing::instrument(err(level = "warn"), skip(self))]
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result: Result<()> = async {
            let mut tx = self.pool.begin().await?;
            self.repo.get_by_id(&mut tx, id).await?;
            self.repo.delete(&mut tx, id).await?;
            tx.commit().await?;
            Ok(())
        }
        .await;

        self.metrics.record("delete", &result);
        if result.is_ok() {
            tracing::info!("Message deleted");
        }
        result
    }
}
