//! Repository for the `bans` table.

use modrelay_core::types::DbId;
use sqlx::PgPool;

use crate::models::Ban;

/// Column list for `bans` SELECT queries.
const COLUMNS: &str = "user_id, chat_id, reason";

/// Provides upsert, delete, and listing operations for bans.
pub struct BanRepo;

impl BanRepo {
    /// Insert the ban for a (user, chat) pair, replacing the reason if the
    /// pair is already banned.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        chat_id: DbId,
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO bans (user_id, chat_id, reason) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, chat_id) DO UPDATE SET reason = EXCLUDED.reason",
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(reason)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete the ban for a (user, chat) pair. Not an error if absent.
    pub async fn delete(pool: &PgPool, user_id: DbId, chat_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM bans WHERE user_id = $1 AND chat_id = $2")
            .bind(user_id)
            .bind(chat_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// All bans currently held against a user, across chats.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Ban>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bans WHERE user_id = $1 ORDER BY chat_id");
        sqlx::query_as::<_, Ban>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
