use modrelay_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `bans` table. At most one row per (user, chat) pair;
/// re-banning replaces the reason.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ban {
    pub user_id: DbId,
    pub chat_id: DbId,
    pub reason: String,
}
