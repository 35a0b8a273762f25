//! The gateway seam — the chat transport consumed by the scheduling core.
//!
//! The hosting process supplies an implementation (a real chat backend, or
//! the console shim in the `oobot` binary); the core only ever talks to this
//! trait.

use async_trait::async_trait;
use futures::stream::Stream;

use crate::error::Result;
use crate::types::{ChannelId, ChatEvent, IncomingMessage, UserId};

/// RAII handle for a channel's typing indicator. Dropping the guard releases
/// the indicator, on every exit path including failures.
pub trait TypingGuard: Send {}

/// Presence advertised by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceStatus {
    Online,
    Idle,
}

#[async_trait]
pub trait Gateway: Send + Sync {
    /// The account this agent is signed in as.
    fn current_user(&self) -> UserId;

    /// Resolve a channel id to a human-friendly label for logs. An error
    /// means the channel is unusable (unknown id, missing permissions).
    async fn describe_channel(&self, channel_id: ChannelId) -> Result<String>;

    /// Send a fresh message to a channel.
    async fn send(&self, channel_id: ChannelId, text: &str) -> Result<()>;

    /// Reply to a specific message in its channel.
    async fn reply(&self, to: &IncomingMessage, text: &str) -> Result<()>;

    /// Acquire the typing indicator for a channel. Released when the
    /// returned guard drops.
    async fn typing(&self, channel_id: ChannelId) -> Result<Box<dyn TypingGuard>>;

    /// Update the agent's presence. Transports without a presence concept
    /// just accept it.
    async fn set_presence(&self, status: PresenceStatus, activity: &str) -> Result<()> {
        let _ = (status, activity);
        Ok(())
    }

    /// The authenticated event stream: one `Ready`, then messages.
    async fn listen(&self) -> Result<Box<dyn Stream<Item = ChatEvent> + Send + Unpin>>;
}
