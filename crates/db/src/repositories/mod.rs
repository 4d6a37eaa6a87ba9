//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and run exactly one statement.
//! Multi-statement transactions are deliberately absent: every operation
//! is independently atomic at the statement level, and cross-operation
//! consistency is the caller's concern.

pub mod ban_repo;
pub mod chat_setting_repo;
pub mod chat_user_repo;
pub mod dashboard_repo;
pub mod moderator_repo;
pub mod punishment_repo;
pub mod warning_repo;

pub use ban_repo::BanRepo;
pub use chat_setting_repo::ChatSettingRepo;
pub use chat_user_repo::ChatUserRepo;
pub use dashboard_repo::DashboardRepo;
pub use moderator_repo::ModeratorRepo;
pub use punishment_repo::PunishmentRepo;
pub use warning_repo::WarningRepo;
