//! Punishment audit-log models.

use chrono::NaiveDate;
use modrelay_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `punishments` table.
///
/// Rows are inserted and, in the single case of lifting the latest mute,
/// deleted by id — never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Punishment {
    pub id: DbId,
    pub user_id: DbId,
    pub chat_id: DbId,
    pub punishment_type: String,
    pub reason: String,
    pub timestamp: Timestamp,
    pub duration_minutes: Option<i32>,
    pub moderator_id: DbId,
}

/// A punishment row joined to the issuing moderator's username, as shown
/// in history listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PunishmentRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub chat_id: DbId,
    pub punishment_type: String,
    pub reason: String,
    pub timestamp: Timestamp,
    pub duration_minutes: Option<i32>,
    pub moderator_id: DbId,
    /// Username of the issuing moderator, if still registered.
    pub moderator_username: Option<String>,
}

/// One (punishment type, calendar date) bucket of the trailing-window
/// statistics.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PunishmentStat {
    pub punishment_type: String,
    pub date: NaiveDate,
    pub count: i64,
}

/// Punishments issued per moderator over a trailing window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModeratorActivity {
    pub moderator_id: DbId,
    pub count: i64,
}
