use modrelay_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `chat_users` cache table.
///
/// The bot refreshes this cache as it sees users; the dashboard only
/// reads it for search and display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatUser {
    pub user_id: DbId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub last_seen: Timestamp,
}

impl ChatUser {
    /// Best available display name: `@username`, then real name, then the
    /// numeric id.
    pub fn display_name(&self) -> String {
        if let Some(username) = &self.username {
            return format!("@{username}");
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => format!("User {}", self.user_id),
        }
    }
}
