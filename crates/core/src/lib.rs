//! Shared domain vocabulary for the modrelay workspace.
//!
//! This crate holds the types every other crate agrees on:
//!
//! - [`types`] — platform-wide type aliases (`DbId`, `Timestamp`).
//! - [`moderation`] — the moderation action vocabulary
//!   ([`PunishmentKind`](moderation::PunishmentKind),
//!   [`TaskKind`](moderation::TaskKind)).

pub mod moderation;
pub mod types;

pub use moderation::{PunishmentKind, TaskKind};
