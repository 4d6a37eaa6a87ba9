//! Aggregate queries backing the dashboard landing page.

use sqlx::PgPool;

use crate::models::DashboardCounts;

/// Provides the headline totals in one round trip.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Total bans, registered moderators, and known chats.
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT \
                (SELECT COUNT(*) FROM bans) AS total_bans, \
                (SELECT COUNT(*) FROM moderators) AS total_moderators, \
                (SELECT COUNT(*) FROM chat_settings) AS total_chats",
        )
        .fetch_one(pool)
        .await
    }
}
