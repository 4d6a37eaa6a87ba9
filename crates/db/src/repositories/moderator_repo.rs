//! Repository for the `moderators` registry table.

use modrelay_core::types::DbId;
use sqlx::PgPool;

use crate::models::Moderator;

/// Column list for `moderators` SELECT queries.
const COLUMNS: &str = "user_id, username";

/// Provides registry operations for moderators.
pub struct ModeratorRepo;

impl ModeratorRepo {
    /// Register a moderator, replacing the stored username on re-add.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        username: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO moderators (user_id, username) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET username = EXCLUDED.username",
        )
        .bind(user_id)
        .bind(username)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a moderator. Not an error if absent.
    pub async fn delete(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM moderators WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Whether the user is a registered moderator.
    pub async fn exists(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM moderators WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// All registered moderators, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Moderator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM moderators ORDER BY user_id");
        sqlx::query_as::<_, Moderator>(&query).fetch_all(pool).await
    }
}
