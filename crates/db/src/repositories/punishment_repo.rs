//! Repository for the `punishments` audit log.
//!
//! The log is append-only. The one sanctioned deletion is lifting the
//! most recent mute for a (user, chat) pair; nothing is ever updated in
//! place.

use modrelay_core::moderation::PunishmentKind;
use modrelay_core::types::DbId;
use sqlx::PgPool;

use crate::models::{ModeratorActivity, Punishment, PunishmentRecord, PunishmentStat};

/// Column list for `punishments` SELECT queries.
const COLUMNS: &str = "\
    id, user_id, chat_id, punishment_type, reason, \
    timestamp, duration_minutes, moderator_id";

/// Column list for history queries joined to the issuing moderator.
const RECORD_COLUMNS: &str = "\
    p.id, p.user_id, p.chat_id, p.punishment_type, p.reason, \
    p.timestamp, p.duration_minutes, p.moderator_id, \
    m.username AS moderator_username";

/// Provides append and query operations for the punishment audit log.
pub struct PunishmentRepo;

impl PunishmentRepo {
    /// Append one punishment entry. `timestamp` is assigned by the
    /// database.
    pub async fn insert(
        pool: &PgPool,
        user_id: DbId,
        chat_id: DbId,
        kind: PunishmentKind,
        reason: &str,
        moderator_id: DbId,
        duration_minutes: Option<i32>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO punishments \
                (user_id, chat_id, punishment_type, reason, moderator_id, duration_minutes) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(kind.as_str())
        .bind(reason)
        .bind(moderator_id)
        .bind(duration_minutes)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Delete the most recent mute entry for a (user, chat) pair, by
    /// timestamp. Older mutes survive; a pair with no mute is a no-op.
    pub async fn delete_latest_mute(
        pool: &PgPool,
        user_id: DbId,
        chat_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM punishments \
             WHERE id = ( \
                 SELECT id FROM punishments \
                 WHERE user_id = $1 AND chat_id = $2 AND punishment_type = $3 \
                 ORDER BY timestamp DESC \
                 LIMIT 1 \
             )",
        )
        .bind(user_id)
        .bind(chat_id)
        .bind(PunishmentKind::Mute.as_str())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Punishment history for a user, newest first, optionally restricted
    /// to one chat, with the issuing moderator's username joined in.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        chat_id: Option<DbId>,
    ) -> Result<Vec<PunishmentRecord>, sqlx::Error> {
        match chat_id {
            Some(chat_id) => {
                let query = format!(
                    "SELECT {RECORD_COLUMNS} FROM punishments p \
                     LEFT JOIN moderators m ON p.moderator_id = m.user_id \
                     WHERE p.user_id = $1 AND p.chat_id = $2 \
                     ORDER BY p.timestamp DESC"
                );
                sqlx::query_as::<_, PunishmentRecord>(&query)
                    .bind(user_id)
                    .bind(chat_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {RECORD_COLUMNS} FROM punishments p \
                     LEFT JOIN moderators m ON p.moderator_id = m.user_id \
                     WHERE p.user_id = $1 \
                     ORDER BY p.timestamp DESC"
                );
                sqlx::query_as::<_, PunishmentRecord>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Most recent punishments across all users, for the dashboard feed.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PunishmentRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM punishments p \
             LEFT JOIN moderators m ON p.moderator_id = m.user_id \
             ORDER BY p.timestamp DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, PunishmentRecord>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Punishments issued by one moderator, newest first.
    pub async fn list_by_moderator(
        pool: &PgPool,
        moderator_id: DbId,
    ) -> Result<Vec<Punishment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM punishments \
             WHERE moderator_id = $1 \
             ORDER BY timestamp DESC"
        );
        sqlx::query_as::<_, Punishment>(&query)
            .bind(moderator_id)
            .fetch_all(pool)
            .await
    }

    /// Per-type, per-day counts over the trailing `days` window, newest
    /// date first. The window predicate is inclusive of its lower bound.
    pub async fn stats_by_day(
        pool: &PgPool,
        chat_id: Option<DbId>,
        days: i32,
    ) -> Result<Vec<PunishmentStat>, sqlx::Error> {
        match chat_id {
            Some(chat_id) => {
                sqlx::query_as::<_, PunishmentStat>(
                    "SELECT punishment_type, timestamp::date AS date, COUNT(*) AS count \
                     FROM punishments \
                     WHERE timestamp >= NOW() - make_interval(days => $1) AND chat_id = $2 \
                     GROUP BY punishment_type, timestamp::date \
                     ORDER BY date DESC",
                )
                .bind(days)
                .bind(chat_id)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, PunishmentStat>(
                    "SELECT punishment_type, timestamp::date AS date, COUNT(*) AS count \
                     FROM punishments \
                     WHERE timestamp >= NOW() - make_interval(days => $1) \
                     GROUP BY punishment_type, timestamp::date \
                     ORDER BY date DESC",
                )
                .bind(days)
                .fetch_all(pool)
                .await
            }
        }
    }

    /// Most active moderators over the trailing `days` window.
    pub async fn top_moderators(
        pool: &PgPool,
        chat_id: Option<DbId>,
        days: i32,
        limit: i64,
    ) -> Result<Vec<ModeratorActivity>, sqlx::Error> {
        match chat_id {
            Some(chat_id) => {
                sqlx::query_as::<_, ModeratorActivity>(
                    "SELECT moderator_id, COUNT(*) AS count \
                     FROM punishments \
                     WHERE timestamp >= NOW() - make_interval(days => $1) AND chat_id = $2 \
                     GROUP BY moderator_id \
                     ORDER BY count DESC \
                     LIMIT $3",
                )
                .bind(days)
                .bind(chat_id)
                .bind(limit)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ModeratorActivity>(
                    "SELECT moderator_id, COUNT(*) AS count \
                     FROM punishments \
                     WHERE timestamp >= NOW() - make_interval(days => $1) \
                     GROUP BY moderator_id \
                     ORDER BY count DESC \
                     LIMIT $2",
                )
                .bind(days)
                .bind(limit)
                .fetch_all(pool)
                .await
            }
        }
    }
}
