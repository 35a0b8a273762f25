//! Shared test double: an in-memory gateway that records everything.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, Stream};
use oobot_core::error::{OobotError, Result};
use oobot_core::traits::{Gateway, TypingGuard};
use oobot_core::types::{ChannelId, ChatEvent, IncomingMessage, MessageId, UserId};

/// The account the agent is signed in as.
pub const BOT: UserId = UserId(1_000);
/// Somebody else in the channel.
pub const PEER: UserId = UserId(7);

#[derive(Default)]
pub struct MockGateway {
    pub sends: Mutex<Vec<(ChannelId, String)>>,
    pub replies: Mutex<Vec<(MessageId, String)>>,
    pub typing_started: AtomicUsize,
    typing_released: Arc<AtomicUsize>,
    pub fail_sends: AtomicBool,
    unresolvable: Mutex<HashSet<ChannelId>>,
}

struct MockTyping {
    released: Arc<AtomicUsize>,
}

impl TypingGuard for MockTyping {}

impl Drop for MockTyping {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn mark_unresolvable(&self, channel_id: ChannelId) {
        self.unresolvable.lock().unwrap().insert(channel_id);
    }

    pub fn send_count(&self) -> usize {
        self.sends.lock().unwrap().len()
    }

    pub fn reply_count(&self) -> usize {
        self.replies.lock().unwrap().len()
    }

    pub fn typing_count(&self) -> usize {
        self.typing_started.load(Ordering::SeqCst)
    }

    pub fn typing_released_count(&self) -> usize {
        self.typing_released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Gateway for MockGateway {
    fn current_user(&self) -> UserId {
        BOT
    }

    async fn describe_channel(&self, channel_id: ChannelId) -> Result<String> {
        if self.unresolvable.lock().unwrap().contains(&channel_id) {
            return Err(OobotError::Resolve(format!("unknown channel {channel_id}")));
        }
        Ok(format!("#mock-{channel_id}"))
    }

    async fn send(&self, channel_id: ChannelId, text: &str) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(OobotError::Gateway("send refused".into()));
        }
        self.sends.lock().unwrap().push((channel_id, text.to_string()));
        Ok(())
    }

    async fn reply(&self, to: &IncomingMessage, text: &str) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(OobotError::Gateway("reply refused".into()));
        }
        self.replies.lock().unwrap().push((to.id, text.to_string()));
        Ok(())
    }

    async fn typing(&self, _channel_id: ChannelId) -> Result<Box<dyn TypingGuard>> {
        self.typing_started.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockTyping {
            released: self.typing_released.clone(),
        }))
    }

    async fn listen(&self) -> Result<Box<dyn Stream<Item = ChatEvent> + Send + Unpin>> {
        Ok(Box::new(stream::pending()))
    }
}

/// Let spawned tasks run without letting the paused clock auto-advance.
pub async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}

pub fn channel_message(id: u64, channel: ChannelId, author: UserId) -> IncomingMessage {
    IncomingMessage {
        id: MessageId(id),
        channel_id: channel,
        author,
        author_name: None,
        content: "hello".into(),
        is_direct: false,
        mentions: Vec::new(),
    }
}

pub fn mention_message(id: u64, channel: ChannelId) -> IncomingMessage {
    IncomingMessage {
        mentions: vec![BOT],
        ..channel_message(id, channel, PEER)
    }
}

pub fn dm_message(id: u64, channel: ChannelId) -> IncomingMessage {
    IncomingMessage {
        is_direct: true,
        ..channel_message(id, channel, PEER)
    }
}
