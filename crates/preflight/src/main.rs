//! Deploy-time smoke check.
//!
//! Connects to the moderation store and the task queue with the same
//! configuration the dashboard will use, applies pending migrations, and
//! reports headline state. Exits non-zero (by panicking through
//! `expect`) on the first failure so deploys stop before traffic does.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use modrelay_db::{ContextId, DatabaseConfig, ModerationStore, PoolRegistry};
use modrelay_queue::{QueueConfig, TaskQueue};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modrelay_preflight=info,modrelay_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_config = DatabaseConfig::from_env();
    let registry =
        PoolRegistry::new(&db_config).expect("DATABASE_URL must be a valid Postgres URL");
    let store = ModerationStore::new(registry);
    let ctx = ContextId::next();

    let pool = store
        .registry()
        .acquire(ctx)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    modrelay_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    modrelay_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let counts = store
        .dashboard_counts(ctx)
        .await
        .expect("Failed to read dashboard counts");
    tracing::info!(
        bans = counts.total_bans,
        moderators = counts.total_moderators,
        chats = counts.total_chats,
        "Moderation store reachable"
    );

    let queue = TaskQueue::connect(&QueueConfig::from_env())
        .await
        .expect("Failed to connect to task queue");
    let depth = queue.len().await.expect("Failed to read queue length");
    tracing::info!(depth, "Task queue reachable");

    store.close_all().await;
    tracing::info!("Preflight checks passed");
}
