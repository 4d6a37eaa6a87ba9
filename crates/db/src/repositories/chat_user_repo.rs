//! Repository for the `chat_users` cache table.

use modrelay_core::types::DbId;
use sqlx::PgPool;

use crate::models::ChatUser;

/// Column list for `chat_users` SELECT queries.
const COLUMNS: &str = "user_id, username, first_name, last_name, last_seen";

/// Provides cache refresh and lookup operations for platform users.
pub struct ChatUserRepo;

impl ChatUserRepo {
    /// Record a sighting of a user, refreshing names and `last_seen`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO chat_users (user_id, username, first_name, last_name) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO UPDATE SET \
                username = EXCLUDED.username, \
                first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                last_seen = NOW()",
        )
        .bind(user_id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Look up one cached user.
    pub async fn find(pool: &PgPool, user_id: DbId) -> Result<Option<ChatUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chat_users WHERE user_id = $1");
        sqlx::query_as::<_, ChatUser>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Search cached users by username or first-name substring, or by
    /// exact numeric id, most recently seen first.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatUser>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chat_users \
             WHERE username ILIKE '%' || $1 || '%' \
                OR first_name ILIKE '%' || $1 || '%' \
                OR user_id::TEXT = $1 \
             ORDER BY last_seen DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ChatUser>(&query)
            .bind(term)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
