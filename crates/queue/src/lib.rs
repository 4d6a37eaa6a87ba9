//! Durable hand-off channel between the dashboard and the enforcement
//! bot.
//!
//! The dashboard records intent in the moderation store, then pushes a
//! [`ModerationTask`] here; the bot drains the queue and applies the
//! action at the chat-platform level. The two sides share nothing but
//! this list:
//!
//! - [`ModerationTask`] — the wire record, one JSON object per task.
//! - [`TaskQueue`] — FIFO push/pop/len over a Redis list.
//!
//! Delivery is at-most-once: a popped task is gone whether or not the
//! bot manages to act on it, and a push that fails is not retried here.

pub mod error;
pub mod queue;
pub mod task;

pub use error::{QueueError, QueueResult};
pub use queue::{QueueConfig, TaskQueue};
pub use task::ModerationTask;
