//! Repository for the `warnings` table.
//!
//! Warn-count arithmetic happens server-side in single statements so two
//! moderators acting on the same user cannot lose an update.

use modrelay_core::types::DbId;
use sqlx::PgPool;

use crate::models::Warning;

/// Column list for `warnings` SELECT queries.
const COLUMNS: &str = "user_id, chat_id, warn_count";

/// Provides counter operations for warnings.
pub struct WarningRepo;

impl WarningRepo {
    /// Add one warning and return the new count (always >= 1).
    ///
    /// Creates the row at 1 on first warning, increments atomically on
    /// conflict.
    pub async fn increment(pool: &PgPool, user_id: DbId, chat_id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO warnings (user_id, chat_id, warn_count) \
             VALUES ($1, $2, 1) \
             ON CONFLICT (user_id, chat_id) \
             DO UPDATE SET warn_count = warnings.warn_count + 1 \
             RETURNING warn_count",
        )
        .bind(user_id)
        .bind(chat_id)
        .fetch_one(pool)
        .await
    }

    /// Remove one warning, floored at zero, and return the resulting
    /// count. A pair with no row stays absent and reports 0.
    pub async fn decrement(pool: &PgPool, user_id: DbId, chat_id: DbId) -> Result<i32, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i32>(
            "UPDATE warnings \
             SET warn_count = GREATEST(0, warn_count - 1) \
             WHERE user_id = $1 AND chat_id = $2 \
             RETURNING warn_count",
        )
        .bind(user_id)
        .bind(chat_id)
        .fetch_optional(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Current warning count for a (user, chat) pair; 0 when absent.
    pub async fn current(pool: &PgPool, user_id: DbId, chat_id: DbId) -> Result<i32, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i32>(
            "SELECT warn_count FROM warnings WHERE user_id = $1 AND chat_id = $2",
        )
        .bind(user_id)
        .bind(chat_id)
        .fetch_optional(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// All warning rows for a user, across chats.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Warning>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM warnings WHERE user_id = $1 ORDER BY chat_id");
        sqlx::query_as::<_, Warning>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
