//! Identifier and message types crossing the gateway seam.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric channel identifier, as issued by the chat transport.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChannelId(pub u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChannelId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ChannelId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Numeric user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric message identifier, used as a reply target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inbound chat message, already normalized by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub author: UserId,
    pub author_name: Option<String>,
    pub content: String,
    /// One-on-one conversation rather than a guild/group channel.
    #[serde(default)]
    pub is_direct: bool,
    /// Users explicitly mentioned in the message body.
    #[serde(default)]
    pub mentions: Vec<UserId>,
}

impl IncomingMessage {
    /// Whether the message mentions the given user.
    pub fn mentions(&self, user: UserId) -> bool {
        self.mentions.contains(&user)
    }
}

/// Events produced by a gateway's `listen` stream.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The transport is authenticated and message flow is about to start.
    Ready,
    /// A message arrived in some channel the transport can see.
    Message(IncomingMessage),
}
