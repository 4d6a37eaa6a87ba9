use serde::Serialize;
use sqlx::FromRow;

/// Headline totals shown on the dashboard landing page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardCounts {
    pub total_bans: i64,
    pub total_moderators: i64,
    pub total_chats: i64,
}
