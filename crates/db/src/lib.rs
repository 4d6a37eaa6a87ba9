//! Moderation data-access layer.
//!
//! This crate owns every statement issued against the shared moderation
//! schema:
//!
//! - [`config`] — database configuration loaded from the environment,
//!   including the TLS policy.
//! - [`registry`] — [`PoolRegistry`], one lazily-created connection pool
//!   per execution context.
//! - [`models`] — row structs for the moderation tables.
//! - [`repositories`] — zero-sized structs with async methods that take
//!   `&PgPool` as the first argument.
//! - [`store`] — [`ModerationStore`], the facade the dashboard and API
//!   layers are handed at startup.
//!
//! The enforcement bot shares these tables; nothing here talks to the
//! chat platform itself.

pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod repositories;
pub mod store;

pub use config::{DatabaseConfig, SslMode};
pub use error::{StoreError, StoreResult};
pub use registry::{ContextId, PoolRegistry};
pub use store::ModerationStore;

pub type DbPool = sqlx::PgPool;

/// Verify the database is reachable with a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
