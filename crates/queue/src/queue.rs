//! Redis-backed FIFO of pending moderation tasks.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::QueueResult;
use crate::task::ModerationTask;

/// Default list key, shared with the enforcement bot.
const DEFAULT_QUEUE_KEY: &str = "moderation_queue";

/// Queue configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Redis connection URL.
    pub url: String,
    /// List key tasks are pushed onto (default: `moderation_queue`).
    pub queue_key: String,
}

impl QueueConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                      |
    /// |------------------------|------------------------------|
    /// | `REDIS_URL`            | `redis://127.0.0.1:6379/0`   |
    /// | `MODERATION_QUEUE_KEY` | `moderation_queue`           |
    pub fn from_env() -> Self {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/0".into());
        let queue_key =
            std::env::var("MODERATION_QUEUE_KEY").unwrap_or_else(|_| DEFAULT_QUEUE_KEY.into());
        Self { url, queue_key }
    }
}

/// FIFO work queue over a Redis list.
///
/// `push` appends to the tail, `pop` takes from the head. There is no
/// consumer acknowledgement and no visibility timeout: a popped task is
/// gone regardless of what the consumer does with it. The queue is also
/// independent of the moderation store — a push is never rolled back when
/// a related store write fails, so callers push only after the store
/// write succeeds.
#[derive(Clone)]
pub struct TaskQueue {
    connection: ConnectionManager,
    key: String,
}

impl TaskQueue {
    /// Connect to the queue store.
    ///
    /// Fails when the URL is malformed or the initial connection cannot
    /// be established; afterwards the managed connection reconnects on
    /// its own.
    pub async fn connect(config: &QueueConfig) -> QueueResult<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = client.get_connection_manager().await?;
        Ok(Self {
            connection,
            key: config.queue_key.clone(),
        })
    }

    /// Append a task to the tail of the queue.
    pub async fn push(&self, task: &ModerationTask) -> QueueResult<()> {
        let payload = serde_json::to_string(task)?;
        let mut connection = self.connection.clone();
        let _: i64 = connection.rpush(&self.key, payload).await?;
        tracing::debug!(
            task_type = %task.task_type,
            user_id = task.user_id,
            chat_id = task.chat_id,
            "Queued moderation task"
        );
        Ok(())
    }

    /// Take the task at the head of the queue, or `None` when empty.
    /// Does not block or retry.
    pub async fn pop(&self) -> QueueResult<Option<ModerationTask>> {
        let mut connection = self.connection.clone();
        let raw: Option<String> = connection.lpop(&self.key, None).await?;
        match raw {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    /// Number of tasks currently waiting.
    pub async fn len(&self) -> QueueResult<usize> {
        let mut connection = self.connection.clone();
        let len: usize = connection.llen(&self.key).await?;
        Ok(len)
    }

    /// Whether the queue is currently empty.
    pub async fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len().await? == 0)
    }

    /// Drop every pending task. Intended for tests only.
    pub async fn clear(&self) -> QueueResult<()> {
        let mut connection = self.connection.clone();
        let _: i64 = connection.del(&self.key).await?;
        Ok(())
    }
}
