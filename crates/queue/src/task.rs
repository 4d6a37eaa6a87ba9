//! The task record relayed to the enforcement bot.

use modrelay_core::moderation::TaskKind;
use modrelay_core::types::DbId;
use serde::{Deserialize, Serialize};

/// One pending moderation action, serialized field-for-field onto the
/// queue.
///
/// Constructed via [`ModerationTask::new`] and enriched with the builder
/// methods [`with_username`](ModerationTask::with_username),
/// [`with_reason`](ModerationTask::with_reason), and
/// [`with_duration`](ModerationTask::with_duration). Whoever holds the
/// value owns it: the producer hands it over on push, the consumer takes
/// it on pop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationTask {
    /// What the bot should do, e.g. `"ban"` or `"unmute"`.
    pub task_type: TaskKind,

    /// Target user.
    pub user_id: DbId,

    /// Target user's username, when known.
    pub username: Option<String>,

    /// Human-entered reason; reversals carry none.
    pub reason: Option<String>,

    /// Chat in which to act.
    pub chat_id: DbId,

    /// Moderator who requested the action.
    pub moderator_id: DbId,

    /// Mute duration; absent for every other task type.
    pub duration_minutes: Option<i32>,
}

impl ModerationTask {
    /// Create a task with only the required fields.
    pub fn new(task_type: TaskKind, user_id: DbId, chat_id: DbId, moderator_id: DbId) -> Self {
        Self {
            task_type,
            user_id,
            username: None,
            reason: None,
            chat_id,
            moderator_id,
            duration_minutes: None,
        }
    }

    /// Attach the target's username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Attach the moderator's stated reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach a mute duration in minutes.
    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }
}
