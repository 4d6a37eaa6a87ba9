use modrelay_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `chat_settings` table.
///
/// A chat with no row behaves as if `filter_enabled` were true; the row
/// appears the first time someone toggles the filter or the bot records
/// the chat title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatSetting {
    pub chat_id: DbId,
    pub chat_title: Option<String>,
    pub filter_enabled: bool,
}
