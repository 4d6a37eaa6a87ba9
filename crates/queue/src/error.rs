/// Failures surfaced by the task queue.
///
/// Propagated as-is; nothing is retried at this layer.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The queue store is unreachable or rejected the command.
    #[error("queue store unreachable: {0}")]
    Connection(#[from] redis::RedisError),

    /// A task could not be encoded to or decoded from its wire form.
    #[error("task serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for queue operation results.
pub type QueueResult<T> = Result<T, QueueError>;
