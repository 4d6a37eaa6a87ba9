use modrelay_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `warnings` table.
///
/// `warn_count` never goes below zero; rows are kept at zero rather than
/// deleted so the history of "warned at least once" survives.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Warning {
    pub user_id: DbId,
    pub chat_id: DbId,
    pub warn_count: i32,
}
