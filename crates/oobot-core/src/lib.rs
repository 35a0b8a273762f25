//! # oobot Core
//! Shared foundation for the oobot workspace: identifier and message types,
//! the error taxonomy, configuration, and the `Gateway` trait that stands in
//! for whatever chat transport hosts the agent.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{AmbientConfig, OobotConfig};
pub use error::{OobotError, Result};
pub use traits::{Gateway, PresenceStatus, TypingGuard};
pub use types::{ChannelId, ChatEvent, IncomingMessage, MessageId, UserId};
