//! Integration tests for the moderation store operations.
//!
//! Exercises the full facade against a real database: upsert semantics,
//! warning counter arithmetic, mute removal, settings defaults, audit
//! history, and the dashboard aggregates.

use modrelay_core::moderation::PunishmentKind;
use modrelay_db::{ContextId, ModerationStore, PoolRegistry};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

const USER: i64 = 1001;
const CHAT: i64 = -5001;
const OTHER_CHAT: i64 = -5002;
const MOD: i64 = 9001;

fn store_from(connect_opts: PgConnectOptions) -> ModerationStore {
    ModerationStore::new(PoolRegistry::from_options(connect_opts))
}

/// Direct pool handle for fixture adjustments (backdating audit rows).
async fn raw_pool(store: &ModerationStore, ctx: ContextId) -> PgPool {
    store.registry().acquire(ctx).await.unwrap()
}

async fn backdate_punishments_by_reason(pool: &PgPool, reason: &str, interval: &str) {
    let query = format!("UPDATE punishments SET timestamp = NOW() - INTERVAL '{interval}' WHERE reason = $1");
    sqlx::query(&query).bind(reason).execute(pool).await.unwrap();
}

// ---------------------------------------------------------------------------
// Bans
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn banning_twice_keeps_one_row_with_the_latest_reason(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.add_ban(ctx, USER, CHAT, "spam").await.unwrap();
    store.add_ban(ctx, USER, CHAT, "repeated spam").await.unwrap();

    let bans = store.get_user_bans(ctx, USER).await.unwrap();
    assert_eq!(bans.len(), 1);
    assert_eq!(bans[0].reason, "repeated spam");

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bans_are_scoped_per_chat(_pool_opts: PgPoolOptions, connect_opts: PgConnectOptions) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.add_ban(ctx, USER, CHAT, "spam").await.unwrap();
    store.add_ban(ctx, USER, OTHER_CHAT, "flood").await.unwrap();
    assert_eq!(store.get_user_bans(ctx, USER).await.unwrap().len(), 2);

    store.remove_ban(ctx, USER, CHAT).await.unwrap();
    let bans = store.get_user_bans(ctx, USER).await.unwrap();
    assert_eq!(bans.len(), 1);
    assert_eq!(bans[0].chat_id, OTHER_CHAT);

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn removing_an_absent_ban_is_a_noop(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.remove_ban(ctx, USER, CHAT).await.unwrap();
    assert!(store.get_user_bans(ctx, USER).await.unwrap().is_empty());

    store.close_all().await;
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn warnings_accumulate_and_read_back(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    assert_eq!(store.add_warning(ctx, USER, CHAT).await.unwrap(), 1);
    assert_eq!(store.add_warning(ctx, USER, CHAT).await.unwrap(), 2);
    assert_eq!(store.add_warning(ctx, USER, CHAT).await.unwrap(), 3);
    assert_eq!(store.get_warning_count(ctx, USER, CHAT).await.unwrap(), 3);

    // Separate chats keep separate counters.
    assert_eq!(store.add_warning(ctx, USER, OTHER_CHAT).await.unwrap(), 1);
    assert_eq!(store.get_warning_count(ctx, USER, CHAT).await.unwrap(), 3);

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn warning_count_never_goes_below_zero(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.add_warning(ctx, USER, CHAT).await.unwrap();
    assert_eq!(store.remove_warning(ctx, USER, CHAT).await.unwrap(), 0);
    assert_eq!(store.remove_warning(ctx, USER, CHAT).await.unwrap(), 0);
    assert_eq!(store.get_warning_count(ctx, USER, CHAT).await.unwrap(), 0);

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn removing_warnings_from_an_unwarned_user_reports_zero(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    assert_eq!(store.remove_warning(ctx, USER, CHAT).await.unwrap(), 0);
    assert_eq!(store.get_warning_count(ctx, USER, CHAT).await.unwrap(), 0);
    assert!(store.get_user_warnings(ctx, USER).await.unwrap().is_empty());

    store.close_all().await;
}

// ---------------------------------------------------------------------------
// Mute removal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unmuting_deletes_only_the_latest_mute(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Mute, "first offense", MOD, Some(30))
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Mute, "second offense", MOD, Some(60))
        .await
        .unwrap();

    // Force an unambiguous ordering between the two entries.
    let pool = raw_pool(&store, ctx).await;
    backdate_punishments_by_reason(&pool, "first offense", "1 hour").await;

    store.remove_mute(ctx, USER, CHAT).await.unwrap();

    let history = store.get_user_punishments(ctx, USER, Some(CHAT)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].reason, "first offense");

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unmuting_leaves_other_punishment_types_alone(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Ban, "spam", MOD, None)
        .await
        .unwrap();

    // No mute on record: nothing to delete, no error either.
    store.remove_mute(ctx, USER, CHAT).await.unwrap();

    let history = store.get_user_punishments(ctx, USER, Some(CHAT)).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].punishment_type, "ban");

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unmuting_is_scoped_to_the_chat(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Mute, "here", MOD, Some(10))
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, OTHER_CHAT, PunishmentKind::Mute, "elsewhere", MOD, Some(10))
        .await
        .unwrap();

    store.remove_mute(ctx, USER, CHAT).await.unwrap();

    let remaining = store.get_user_punishments(ctx, USER, None).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].chat_id, OTHER_CHAT);

    store.close_all().await;
}

// ---------------------------------------------------------------------------
// Moderator registry
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn moderator_registration_round_trip(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    assert!(!store.is_moderator(ctx, MOD).await.unwrap());

    store.add_moderator_to_db(ctx, MOD, Some("mira")).await.unwrap();
    assert!(store.is_moderator(ctx, MOD).await.unwrap());

    // Re-adding replaces the stored username.
    store.add_moderator_to_db(ctx, MOD, Some("mira_renamed")).await.unwrap();
    let moderators = store.list_moderators(ctx).await.unwrap();
    assert_eq!(moderators.len(), 1);
    assert_eq!(moderators[0].username.as_deref(), Some("mira_renamed"));

    store.remove_moderator_from_db(ctx, MOD).await.unwrap();
    assert!(!store.is_moderator(ctx, MOD).await.unwrap());

    store.close_all().await;
}

// ---------------------------------------------------------------------------
// Chat settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_defaults_to_enabled_for_unknown_chats(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    assert!(store.get_filter_status(ctx, CHAT).await.unwrap());

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_toggles_persist_per_chat(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.set_filter_status(ctx, CHAT, false).await.unwrap();
    assert!(!store.get_filter_status(ctx, CHAT).await.unwrap());
    assert!(store.get_filter_status(ctx, OTHER_CHAT).await.unwrap());

    store.set_filter_status(ctx, CHAT, true).await.unwrap();
    assert!(store.get_filter_status(ctx, CHAT).await.unwrap());

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_filter_toggle_covers_every_known_chat(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.set_filter_status(ctx, CHAT, true).await.unwrap();
    store.set_filter_status(ctx, OTHER_CHAT, true).await.unwrap();

    store.set_filter_status_all(ctx, false).await.unwrap();
    let settings = store.list_chat_settings(ctx).await.unwrap();
    assert_eq!(settings.len(), 2);
    assert!(settings.iter().all(|s| !s.filter_enabled));

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn filter_toggle_preserves_the_recorded_chat_title(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    // The bot records titles out of band.
    let pool = raw_pool(&store, ctx).await;
    sqlx::query("INSERT INTO chat_settings (chat_id, chat_title, filter_enabled) VALUES ($1, $2, TRUE)")
        .bind(CHAT)
        .bind("General")
        .execute(&pool)
        .await
        .unwrap();

    store.set_filter_status(ctx, CHAT, false).await.unwrap();

    let settings = store.list_chat_settings(ctx).await.unwrap();
    assert_eq!(settings.len(), 1);
    assert_eq!(settings[0].chat_title.as_deref(), Some("General"));
    assert!(!settings[0].filter_enabled);

    store.close_all().await;
}

// ---------------------------------------------------------------------------
// Punishment history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn punishment_history_is_newest_first_with_moderator_names(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.add_moderator_to_db(ctx, MOD, Some("mira")).await.unwrap();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, "older", MOD, None)
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Ban, "newer", 12345, None)
        .await
        .unwrap();

    let pool = raw_pool(&store, ctx).await;
    backdate_punishments_by_reason(&pool, "older", "2 hours").await;

    let history = store.get_user_punishments(ctx, USER, None).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].reason, "newer");
    assert_eq!(history[1].reason, "older");

    // Registered moderators resolve to a username, unknown ids to None.
    assert_eq!(history[0].moderator_username, None);
    assert_eq!(history[1].moderator_username.as_deref(), Some("mira"));

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn punishment_history_can_be_narrowed_to_one_chat(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Kick, "here", MOD, None)
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, OTHER_CHAT, PunishmentKind::Kick, "elsewhere", MOD, None)
        .await
        .unwrap();

    let here = store.get_user_punishments(ctx, USER, Some(CHAT)).await.unwrap();
    assert_eq!(here.len(), 1);
    assert_eq!(here[0].reason, "here");

    let everywhere = store.get_user_punishments(ctx, USER, None).await.unwrap();
    assert_eq!(everywhere.len(), 2);

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moderator_profile_lists_only_their_punishments(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, "by mira", MOD, None)
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, "by someone else", MOD + 1, None)
        .await
        .unwrap();

    let issued = store.get_moderator_punishments(ctx, MOD).await.unwrap();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0].reason, "by mira");

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recent_punishments_paginate_newest_first(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    for (reason, age) in [("oldest", "3 hours"), ("middle", "2 hours"), ("newest", "1 hour")] {
        store
            .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, reason, MOD, None)
            .await
            .unwrap();
        let pool = raw_pool(&store, ctx).await;
        backdate_punishments_by_reason(&pool, reason, age).await;
    }

    let first_page = store.list_recent_punishments(ctx, 2, 0).await.unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].reason, "newest");
    assert_eq!(first_page[1].reason, "middle");

    let second_page = store.list_recent_punishments(ctx, 2, 2).await.unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].reason, "oldest");

    store.close_all().await;
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_window_excludes_entries_older_than_the_window(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, "stale", MOD, None)
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, "near the edge", MOD, None)
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Ban, "fresh", MOD, None)
        .await
        .unwrap();

    let pool = raw_pool(&store, ctx).await;
    backdate_punishments_by_reason(&pool, "stale", "40 days").await;
    // Inside the window by a minute: the window bound itself is inclusive,
    // measured against the query's clock.
    backdate_punishments_by_reason(&pool, "near the edge", "6 days 23:59:00").await;

    let stats = store.get_moderation_stats(ctx, None, 7).await.unwrap();
    let total: i64 = stats.iter().map(|s| s.count).sum();
    assert_eq!(total, 2);
    assert!(stats.iter().any(|s| s.punishment_type == "warn" && s.count == 1));
    assert!(stats.iter().any(|s| s.punishment_type == "ban" && s.count == 1));

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_group_by_type_and_day_and_respect_the_chat_filter(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, "a", MOD, None)
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, "b", MOD, None)
        .await
        .unwrap();
    store
        .add_punishment(ctx, USER, OTHER_CHAT, PunishmentKind::Warn, "c", MOD, None)
        .await
        .unwrap();

    let all = store.get_moderation_stats(ctx, None, 30).await.unwrap();
    let warn_total: i64 = all
        .iter()
        .filter(|s| s.punishment_type == "warn")
        .map(|s| s.count)
        .sum();
    assert_eq!(warn_total, 3);

    let scoped = store.get_moderation_stats(ctx, Some(CHAT), 30).await.unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].count, 2);

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn top_moderators_rank_by_activity(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    for reason in ["a", "b", "c"] {
        store
            .add_punishment(ctx, USER, CHAT, PunishmentKind::Warn, reason, MOD, None)
            .await
            .unwrap();
    }
    store
        .add_punishment(ctx, USER, CHAT, PunishmentKind::Ban, "d", MOD + 1, None)
        .await
        .unwrap();

    let top = store.get_top_moderators(ctx, None, 30, 10).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].moderator_id, MOD);
    assert_eq!(top[0].count, 3);
    assert_eq!(top[1].count, 1);

    store.close_all().await;
}

// ---------------------------------------------------------------------------
// Dashboard aggregates and user cache
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn dashboard_counts_track_each_table(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    let empty = store.dashboard_counts(ctx).await.unwrap();
    assert_eq!(empty.total_bans, 0);
    assert_eq!(empty.total_moderators, 0);
    assert_eq!(empty.total_chats, 0);

    store.add_ban(ctx, USER, CHAT, "spam").await.unwrap();
    store.add_moderator_to_db(ctx, MOD, Some("mira")).await.unwrap();
    store.set_filter_status(ctx, CHAT, false).await.unwrap();

    let counts = store.dashboard_counts(ctx).await.unwrap();
    assert_eq!(counts.total_bans, 1);
    assert_eq!(counts.total_moderators, 1);
    assert_eq!(counts.total_chats, 1);

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn chat_user_cache_upserts_and_searches(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store
        .upsert_chat_user(ctx, USER, Some("mira"), Some("Mira"), Some("K"))
        .await
        .unwrap();
    store
        .upsert_chat_user(ctx, USER + 1, None, Some("Boris"), None)
        .await
        .unwrap();

    let cached = store.get_chat_user(ctx, USER).await.unwrap().unwrap();
    assert_eq!(cached.display_name(), "@mira");

    // Substring on username, substring on first name, exact id.
    assert_eq!(store.search_chat_users(ctx, "mir", 20, 0).await.unwrap().len(), 1);
    assert_eq!(store.search_chat_users(ctx, "bor", 20, 0).await.unwrap().len(), 1);
    let by_id = store
        .search_chat_users(ctx, &USER.to_string(), 20, 0)
        .await
        .unwrap();
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].user_id, USER);

    // A fresh sighting replaces the cached names.
    store
        .upsert_chat_user(ctx, USER, Some("mira_renamed"), Some("Mira"), None)
        .await
        .unwrap();
    let refreshed = store.get_chat_user(ctx, USER).await.unwrap().unwrap();
    assert_eq!(refreshed.username.as_deref(), Some("mira_renamed"));

    store.close_all().await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_health_check_succeeds_against_a_live_database(
    _pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let store = store_from(connect_opts);
    let ctx = ContextId::next();

    store.health_check(ctx).await.unwrap();

    store.close_all().await;
}
