//! Moderation action vocabulary.
//!
//! [`PunishmentKind`] names the four actions recorded in the punishment
//! audit log. [`TaskKind`] is the wider set of task labels relayed to the
//! enforcement bot, which also includes the reversal actions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four punishment types recorded in the `punishments` table.
///
/// Stored as lowercase text in the `punishment_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunishmentKind {
    Kick,
    Ban,
    Mute,
    Warn,
}

impl PunishmentKind {
    /// The lowercase column value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PunishmentKind::Kick => "kick",
            PunishmentKind::Ban => "ban",
            PunishmentKind::Mute => "mute",
            PunishmentKind::Warn => "warn",
        }
    }
}

impl fmt::Display for PunishmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task labels understood by the enforcement bot.
///
/// Serialized as the lowercase `task_type` field of a queued task. The
/// `Un*` variants ask the bot to reverse a previously applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Ban,
    Kick,
    Mute,
    Warn,
    Unban,
    Unmute,
    Unwarn,
}

impl TaskKind {
    /// The lowercase wire label for this task kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Ban => "ban",
            TaskKind::Kick => "kick",
            TaskKind::Mute => "mute",
            TaskKind::Warn => "warn",
            TaskKind::Unban => "unban",
            TaskKind::Unmute => "unmute",
            TaskKind::Unwarn => "unwarn",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PunishmentKind> for TaskKind {
    fn from(kind: PunishmentKind) -> Self {
        match kind {
            PunishmentKind::Kick => TaskKind::Kick,
            PunishmentKind::Ban => TaskKind::Ban,
            PunishmentKind::Mute => TaskKind::Mute,
            PunishmentKind::Warn => TaskKind::Warn,
        }
    }
}
