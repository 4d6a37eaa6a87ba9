use modrelay_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `moderators` registry table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Moderator {
    pub user_id: DbId,
    pub username: Option<String>,
}
