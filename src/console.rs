//! Console gateway — a stdin/stdout stand-in for a real chat transport.
//!
//! Lines typed on stdin become inbound messages:
//!   `<channel> <text>`     chatter in a channel
//!   `@<channel> <text>`    message that mentions the agent
//!   `dm <text>`            direct message
//! Outbound sends print to stdout.

use async_trait::async_trait;
use futures::stream::Stream;
use oobot_core::error::Result;
use oobot_core::traits::{Gateway, PresenceStatus, TypingGuard};
use oobot_core::types::{ChannelId, ChatEvent, IncomingMessage, MessageId, UserId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// The agent's own account on the console.
const CONSOLE_BOT: UserId = UserId(0);
/// Whoever is typing at the terminal.
const CONSOLE_PEER: UserId = UserId(1);
/// Channel id used for `dm` lines.
const DM_CHANNEL: ChannelId = ChannelId(0);

pub struct ConsoleGateway;

impl ConsoleGateway {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleGateway {
    fn default() -> Self {
        Self::new()
    }
}

struct ConsoleTyping {
    channel_id: ChannelId,
}

impl TypingGuard for ConsoleTyping {}

impl Drop for ConsoleTyping {
    fn drop(&mut self) {
        tracing::trace!("typing released in channel {}", self.channel_id);
    }
}

#[async_trait]
impl Gateway for ConsoleGateway {
    fn current_user(&self) -> UserId {
        CONSOLE_BOT
    }

    async fn describe_channel(&self, channel_id: ChannelId) -> Result<String> {
        Ok(format!("#console-{channel_id}"))
    }

    async fn send(&self, channel_id: ChannelId, text: &str) -> Result<()> {
        println!("[#{channel_id}] oobot: {text}");
        Ok(())
    }

    async fn reply(&self, to: &IncomingMessage, text: &str) -> Result<()> {
        let who = to.author_name.as_deref().unwrap_or("you");
        println!("[#{}] oobot → {who}: {text}", to.channel_id);
        Ok(())
    }

    async fn typing(&self, channel_id: ChannelId) -> Result<Box<dyn TypingGuard>> {
        println!("[#{channel_id}] oobot is typing…");
        Ok(Box::new(ConsoleTyping { channel_id }))
    }

    async fn set_presence(&self, status: PresenceStatus, activity: &str) -> Result<()> {
        tracing::info!("presence: {status:?}, playing {activity}");
        Ok(())
    }

    async fn listen(&self) -> Result<Box<dyn Stream<Item = ChatEvent> + Send + Unpin>> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let _ = tx.send(ChatEvent::Ready);

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut next_id = 1u64;
            while let Ok(Some(line)) = lines.next_line().await {
                if let Some(event) = parse_line(&line, next_id) {
                    next_id += 1;
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });

        Ok(Box::new(UnboundedReceiverStream::new(rx)))
    }
}

/// Turn one console line into an inbound message event.
fn parse_line(line: &str, id: u64) -> Option<ChatEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let message = if let Some(rest) = line.strip_prefix("dm ") {
        IncomingMessage {
            id: MessageId(id),
            channel_id: DM_CHANNEL,
            author: CONSOLE_PEER,
            author_name: Some("console".into()),
            content: rest.trim().to_string(),
            is_direct: true,
            mentions: Vec::new(),
        }
    } else {
        let (raw, mentions) = match line.strip_prefix('@') {
            Some(rest) => (rest, vec![CONSOLE_BOT]),
            None => (line, Vec::new()),
        };
        let (channel, text) = raw.split_once(' ')?;
        let channel_id: ChannelId = channel.parse().ok()?;
        IncomingMessage {
            id: MessageId(id),
            channel_id,
            author: CONSOLE_PEER,
            author_name: Some("console".into()),
            content: text.trim().to_string(),
            is_direct: false,
            mentions,
        }
    };
    Some(ChatEvent::Message(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(line: &str) -> IncomingMessage {
        match parse_line(line, 1) {
            Some(ChatEvent::Message(m)) => m,
            other => panic!("expected a message event, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_channel_line() {
        let msg = message("42 hello there");
        assert_eq!(msg.channel_id, ChannelId(42));
        assert_eq!(msg.content, "hello there");
        assert!(!msg.is_direct);
        assert!(msg.mentions.is_empty());
    }

    #[test]
    fn test_parse_mention_line() {
        let msg = message("@42 hey bot");
        assert_eq!(msg.channel_id, ChannelId(42));
        assert_eq!(msg.mentions, vec![CONSOLE_BOT]);
    }

    #[test]
    fn test_parse_dm_line() {
        let msg = message("dm hi");
        assert!(msg.is_direct);
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn test_ignores_junk() {
        assert!(parse_line("", 1).is_none());
        assert!(parse_line("   ", 1).is_none());
        assert!(parse_line("no-channel-prefix", 1).is_none());
        assert!(parse_line("@junk text", 1).is_none());
    }
}
