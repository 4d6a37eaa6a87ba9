/// Failures surfaced by the moderation store.
///
/// Nothing is retried at this layer; both variants propagate to the
/// caller, which decides whether the failure is user-facing or fatal.
/// Absent rows are not errors — operations resolve them to documented
/// defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Establishing a connection pool for an execution context failed.
    #[error("failed to establish a database connection: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed mid-execution (constraint violation, lost
    /// connection, malformed input).
    #[error("statement execution failed: {0}")]
    Statement(#[source] sqlx::Error),
}

/// Convenience alias for store operation results.
pub type StoreResult<T> = Result<T, StoreError>;
