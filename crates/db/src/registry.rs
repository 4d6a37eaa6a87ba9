//! Per-context connection pool registry.
//!
//! Each execution context (one per worker or request-handling task) gets
//! its own connection pool, created on first use and reused for every
//! later operation in that context. The registry replaces a per-event-loop
//! weak map with explicit tokens and explicit teardown: a context's pool
//! lives until [`PoolRegistry::close_context`] or
//! [`PoolRegistry::close_all`] is called.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tokio::sync::{Mutex, RwLock};

use crate::config::DatabaseConfig;
use crate::error::{StoreError, StoreResult};

/// Connections held open per context pool.
const MIN_POOL_CONNECTIONS: u32 = 1;

/// Connection ceiling per context pool.
const MAX_POOL_CONNECTIONS: u32 = 10;

/// Opaque identity of one execution context.
///
/// Allocate one per worker (or per request-scoped task group) with
/// [`ContextId::next`] and pass it to every store operation issued from
/// that context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    /// Allocate a fresh context identity.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Lazily-created, explicitly-owned connection pools keyed by context.
pub struct PoolRegistry {
    connect_options: PgConnectOptions,
    min_connections: u32,
    max_connections: u32,
    pools: RwLock<HashMap<ContextId, PgPool>>,
    /// Serializes pool creation only; never held during queries.
    creation: Mutex<()>,
}

impl PoolRegistry {
    /// Build a registry from database configuration.
    ///
    /// No connection is attempted here; the first [`acquire`](Self::acquire)
    /// in each context pays the pool-creation cost.
    pub fn new(config: &DatabaseConfig) -> StoreResult<Self> {
        let connect_options = config.connect_options().map_err(StoreError::Connection)?;
        Ok(Self {
            connect_options,
            min_connections: config.min_connections,
            max_connections: config.max_connections,
            pools: RwLock::new(HashMap::new()),
            creation: Mutex::new(()),
        })
    }

    /// Build a registry directly from connection options, with the default
    /// per-context pool limits.
    pub fn from_options(connect_options: PgConnectOptions) -> Self {
        Self {
            connect_options,
            min_connections: MIN_POOL_CONNECTIONS,
            max_connections: MAX_POOL_CONNECTIONS,
            pools: RwLock::new(HashMap::new()),
            creation: Mutex::new(()),
        }
    }

    /// Get the pool for `ctx`, creating it on first use.
    ///
    /// The existence check is the fast path: a read lock, no contention
    /// with other contexts. Creation takes the `creation` mutex and
    /// re-checks, so two tasks racing on the same fresh context cannot
    /// create two pools. Pool creation connects eagerly; an unreachable
    /// database surfaces as [`StoreError::Connection`] to the first caller
    /// in that context.
    pub async fn acquire(&self, ctx: ContextId) -> StoreResult<PgPool> {
        if let Some(pool) = self.pools.read().await.get(&ctx) {
            return Ok(pool.clone());
        }

        let _creating = self.creation.lock().await;
        if let Some(pool) = self.pools.read().await.get(&ctx) {
            return Ok(pool.clone());
        }

        let pool = PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .connect_with(self.connect_options.clone())
            .await
            .map_err(StoreError::Connection)?;

        tracing::debug!(context = ctx.0, "Created connection pool");
        self.pools.write().await.insert(ctx, pool.clone());
        Ok(pool)
    }

    /// Tear down the pool owned by `ctx`, if any.
    pub async fn close_context(&self, ctx: ContextId) {
        let removed = self.pools.write().await.remove(&ctx);
        if let Some(pool) = removed {
            pool.close().await;
            tracing::debug!(context = ctx.0, "Closed connection pool");
        }
    }

    /// Close every known pool and clear the registry.
    ///
    /// Safe to call more than once. Closing is sequential and per-pool, so
    /// one slow pool cannot prevent the rest from being torn down.
    pub async fn close_all(&self) {
        let pools: Vec<(ContextId, PgPool)> = self.pools.write().await.drain().collect();
        for (ctx, pool) in pools {
            pool.close().await;
            tracing::debug!(context = ctx.0, "Closed connection pool");
        }
    }

    /// Number of live pools; one per context that has issued an operation.
    pub async fn pool_count(&self) -> usize {
        self.pools.read().await.len()
    }
}
