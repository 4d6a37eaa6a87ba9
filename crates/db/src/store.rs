//! The moderation store facade.
//!
//! [`ModerationStore`] is constructed once at process start and handed by
//! shared reference to whatever serves requests; there is no process-wide
//! singleton. Every operation takes the caller's [`ContextId`], acquires
//! that context's pool from the owned [`PoolRegistry`], and runs a single
//! statement through the matching repository.
//!
//! Operations are independently atomic at the statement level only. A
//! logical action that spans two operations (say, recording a ban and then
//! appending its audit entry) has no cross-statement transaction: a crash
//! in between leaves the two tables out of step. The same applies between
//! this store and the task queue — callers enqueue bot work only after the
//! store write succeeds, and queue delivery itself is best-effort.

use modrelay_core::moderation::PunishmentKind;
use modrelay_core::types::DbId;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    Ban, ChatSetting, ChatUser, DashboardCounts, Moderator, ModeratorActivity, Punishment,
    PunishmentRecord, PunishmentStat, Warning,
};
use crate::registry::{ContextId, PoolRegistry};
use crate::repositories::{
    BanRepo, ChatSettingRepo, ChatUserRepo, DashboardRepo, ModeratorRepo, PunishmentRepo,
    WarningRepo,
};

/// Atomic moderation-state operations over per-context connection pools.
pub struct ModerationStore {
    registry: PoolRegistry,
}

impl ModerationStore {
    /// Wrap a pool registry. The store takes ownership and closes the
    /// registry's pools on [`close_all`](Self::close_all).
    pub fn new(registry: PoolRegistry) -> Self {
        Self { registry }
    }

    /// The underlying registry, for health checks and explicit context
    /// teardown.
    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Verify the store is reachable from this context.
    pub async fn health_check(&self, ctx: ContextId) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        crate::health_check(&pool).await.map_err(StoreError::Statement)
    }

    /// Close every context pool. Safe to call repeatedly at shutdown.
    pub async fn close_all(&self) {
        self.registry.close_all().await;
    }

    // --- Bans ---

    /// Ban a user in a chat; re-banning replaces the reason.
    pub async fn add_ban(
        &self,
        ctx: ContextId,
        user_id: DbId,
        chat_id: DbId,
        reason: &str,
    ) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        BanRepo::upsert(&pool, user_id, chat_id, reason)
            .await
            .map_err(StoreError::Statement)
    }

    /// Lift a ban. Not an error if the pair was never banned.
    pub async fn remove_ban(&self, ctx: ContextId, user_id: DbId, chat_id: DbId) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        BanRepo::delete(&pool, user_id, chat_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// All bans currently held against a user, across chats.
    pub async fn get_user_bans(&self, ctx: ContextId, user_id: DbId) -> StoreResult<Vec<Ban>> {
        let pool = self.registry.acquire(ctx).await?;
        BanRepo::list_for_user(&pool, user_id)
            .await
            .map_err(StoreError::Statement)
    }

    // --- Warnings ---

    /// Add one warning and return the new count (>= 1).
    pub async fn add_warning(&self, ctx: ContextId, user_id: DbId, chat_id: DbId) -> StoreResult<i32> {
        let pool = self.registry.acquire(ctx).await?;
        WarningRepo::increment(&pool, user_id, chat_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// Remove one warning, floored at zero, and return the resulting
    /// count. 0 when the pair has no warnings at all.
    pub async fn remove_warning(
        &self,
        ctx: ContextId,
        user_id: DbId,
        chat_id: DbId,
    ) -> StoreResult<i32> {
        let pool = self.registry.acquire(ctx).await?;
        WarningRepo::decrement(&pool, user_id, chat_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// Current warning count; 0 when absent.
    pub async fn get_warning_count(
        &self,
        ctx: ContextId,
        user_id: DbId,
        chat_id: DbId,
    ) -> StoreResult<i32> {
        let pool = self.registry.acquire(ctx).await?;
        WarningRepo::current(&pool, user_id, chat_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// All warning rows for a user, across chats.
    pub async fn get_user_warnings(
        &self,
        ctx: ContextId,
        user_id: DbId,
    ) -> StoreResult<Vec<Warning>> {
        let pool = self.registry.acquire(ctx).await?;
        WarningRepo::list_for_user(&pool, user_id)
            .await
            .map_err(StoreError::Statement)
    }

    // --- Mutes ---

    /// Drop the most recent mute entry for a (user, chat) pair from the
    /// audit log. Older mutes survive; no-op when none exists.
    pub async fn remove_mute(&self, ctx: ContextId, user_id: DbId, chat_id: DbId) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        PunishmentRepo::delete_latest_mute(&pool, user_id, chat_id)
            .await
            .map_err(StoreError::Statement)
    }

    // --- Moderator registry ---

    /// Whether the user is a registered moderator.
    pub async fn is_moderator(&self, ctx: ContextId, user_id: DbId) -> StoreResult<bool> {
        let pool = self.registry.acquire(ctx).await?;
        ModeratorRepo::exists(&pool, user_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// Register a moderator; re-adding replaces the stored username.
    pub async fn add_moderator_to_db(
        &self,
        ctx: ContextId,
        user_id: DbId,
        username: Option<&str>,
    ) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        ModeratorRepo::upsert(&pool, user_id, username)
            .await
            .map_err(StoreError::Statement)
    }

    /// Unregister a moderator. Not an error if absent.
    pub async fn remove_moderator_from_db(&self, ctx: ContextId, user_id: DbId) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        ModeratorRepo::delete(&pool, user_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// All registered moderators.
    pub async fn list_moderators(&self, ctx: ContextId) -> StoreResult<Vec<Moderator>> {
        let pool = self.registry.acquire(ctx).await?;
        ModeratorRepo::list(&pool).await.map_err(StoreError::Statement)
    }

    // --- Chat settings ---

    /// The content-filter flag for a chat. A chat with no settings row
    /// reports true.
    pub async fn get_filter_status(&self, ctx: ContextId, chat_id: DbId) -> StoreResult<bool> {
        let pool = self.registry.acquire(ctx).await?;
        let status = ChatSettingRepo::filter_status(&pool, chat_id)
            .await
            .map_err(StoreError::Statement)?;
        Ok(status.unwrap_or(true))
    }

    /// Set the content-filter flag for a chat.
    pub async fn set_filter_status(
        &self,
        ctx: ContextId,
        chat_id: DbId,
        enabled: bool,
    ) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        ChatSettingRepo::upsert_filter(&pool, chat_id, enabled)
            .await
            .map_err(StoreError::Statement)
    }

    /// Set the content-filter flag for every known chat.
    pub async fn set_filter_status_all(&self, ctx: ContextId, enabled: bool) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        ChatSettingRepo::set_all_filters(&pool, enabled)
            .await
            .map_err(StoreError::Statement)
    }

    /// All known chats with their settings.
    pub async fn list_chat_settings(&self, ctx: ContextId) -> StoreResult<Vec<ChatSetting>> {
        let pool = self.registry.acquire(ctx).await?;
        ChatSettingRepo::list(&pool).await.map_err(StoreError::Statement)
    }

    // --- Punishment audit log ---

    /// Append one punishment entry to the audit log.
    pub async fn add_punishment(
        &self,
        ctx: ContextId,
        user_id: DbId,
        chat_id: DbId,
        kind: PunishmentKind,
        reason: &str,
        moderator_id: DbId,
        duration_minutes: Option<i32>,
    ) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        PunishmentRepo::insert(&pool, user_id, chat_id, kind, reason, moderator_id, duration_minutes)
            .await
            .map_err(StoreError::Statement)
    }

    /// Punishment history for a user, newest first, optionally limited to
    /// one chat, with the issuing moderator's username joined in.
    pub async fn get_user_punishments(
        &self,
        ctx: ContextId,
        user_id: DbId,
        chat_id: Option<DbId>,
    ) -> StoreResult<Vec<PunishmentRecord>> {
        let pool = self.registry.acquire(ctx).await?;
        PunishmentRepo::list_for_user(&pool, user_id, chat_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// Punishments issued by one moderator, newest first.
    pub async fn get_moderator_punishments(
        &self,
        ctx: ContextId,
        moderator_id: DbId,
    ) -> StoreResult<Vec<Punishment>> {
        let pool = self.registry.acquire(ctx).await?;
        PunishmentRepo::list_by_moderator(&pool, moderator_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// The most recent punishments across all users, for the dashboard
    /// feed.
    pub async fn list_recent_punishments(
        &self,
        ctx: ContextId,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<PunishmentRecord>> {
        let pool = self.registry.acquire(ctx).await?;
        PunishmentRepo::list_recent(&pool, limit, offset)
            .await
            .map_err(StoreError::Statement)
    }

    /// Per-type, per-day punishment counts over the trailing `days`
    /// window, optionally limited to one chat.
    pub async fn get_moderation_stats(
        &self,
        ctx: ContextId,
        chat_id: Option<DbId>,
        days: i32,
    ) -> StoreResult<Vec<PunishmentStat>> {
        let pool = self.registry.acquire(ctx).await?;
        PunishmentRepo::stats_by_day(&pool, chat_id, days)
            .await
            .map_err(StoreError::Statement)
    }

    /// Most active moderators over the trailing `days` window.
    pub async fn get_top_moderators(
        &self,
        ctx: ContextId,
        chat_id: Option<DbId>,
        days: i32,
        limit: i64,
    ) -> StoreResult<Vec<ModeratorActivity>> {
        let pool = self.registry.acquire(ctx).await?;
        PunishmentRepo::top_moderators(&pool, chat_id, days, limit)
            .await
            .map_err(StoreError::Statement)
    }

    // --- User cache ---

    /// Record a sighting of a platform user in the cache.
    pub async fn upsert_chat_user(
        &self,
        ctx: ContextId,
        user_id: DbId,
        username: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> StoreResult<()> {
        let pool = self.registry.acquire(ctx).await?;
        ChatUserRepo::upsert(&pool, user_id, username, first_name, last_name)
            .await
            .map_err(StoreError::Statement)
    }

    /// Look up one cached user.
    pub async fn get_chat_user(
        &self,
        ctx: ContextId,
        user_id: DbId,
    ) -> StoreResult<Option<ChatUser>> {
        let pool = self.registry.acquire(ctx).await?;
        ChatUserRepo::find(&pool, user_id)
            .await
            .map_err(StoreError::Statement)
    }

    /// Search cached users by name substring or exact id.
    pub async fn search_chat_users(
        &self,
        ctx: ContextId,
        term: &str,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<ChatUser>> {
        let pool = self.registry.acquire(ctx).await?;
        ChatUserRepo::search(&pool, term, limit, offset)
            .await
            .map_err(StoreError::Statement)
    }

    // --- Dashboard aggregates ---

    /// Headline totals for the dashboard landing page.
    pub async fn dashboard_counts(&self, ctx: ContextId) -> StoreResult<DashboardCounts> {
        let pool = self.registry.acquire(ctx).await?;
        DashboardRepo::counts(&pool).await.map_err(StoreError::Statement)
    }
}
