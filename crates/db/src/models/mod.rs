//! Row models for the moderation tables.
//!
//! Each struct derives `FromRow` + `Serialize` and matches its table
//! column-for-column; the join and aggregate shapes used by the dashboard
//! queries live next to the table they are derived from.

pub mod ban;
pub mod chat_setting;
pub mod chat_user;
pub mod dashboard;
pub mod moderator;
pub mod punishment;
pub mod warning;

pub use ban::Ban;
pub use chat_setting::ChatSetting;
pub use chat_user::ChatUser;
pub use dashboard::DashboardCounts;
pub use moderator::Moderator;
pub use punishment::{ModeratorActivity, Punishment, PunishmentRecord, PunishmentStat};
pub use warning::Warning;
