//! Repository for the `chat_settings` table.

use modrelay_core::types::DbId;
use sqlx::PgPool;

use crate::models::ChatSetting;

/// Column list for `chat_settings` SELECT queries.
const COLUMNS: &str = "chat_id, chat_title, filter_enabled";

/// Provides per-chat settings operations.
pub struct ChatSettingRepo;

impl ChatSettingRepo {
    /// The filter flag for a chat, or `None` when the chat has no row.
    pub async fn filter_status(pool: &PgPool, chat_id: DbId) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT filter_enabled FROM chat_settings WHERE chat_id = $1",
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    /// Set the filter flag for a chat, creating the row when absent.
    ///
    /// The update path touches only `filter_enabled` so a title recorded
    /// by the bot survives dashboard toggles.
    pub async fn upsert_filter(
        pool: &PgPool,
        chat_id: DbId,
        enabled: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO chat_settings (chat_id, filter_enabled) \
             VALUES ($1, $2) \
             ON CONFLICT (chat_id) DO UPDATE SET filter_enabled = EXCLUDED.filter_enabled",
        )
        .bind(chat_id)
        .bind(enabled)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Flip the filter flag for every known chat at once.
    pub async fn set_all_filters(pool: &PgPool, enabled: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE chat_settings SET filter_enabled = $1")
            .bind(enabled)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// All known chats, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<ChatSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chat_settings ORDER BY chat_id");
        sqlx::query_as::<_, ChatSetting>(&query).fetch_all(pool).await
    }
}
