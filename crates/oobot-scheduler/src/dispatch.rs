//! Action dispatcher — typing indicator, simulated latency, send/reply.

use std::sync::Arc;
use std::time::Duration;

use oobot_core::error::Result;
use oobot_core::traits::Gateway;
use oobot_core::types::{ChannelId, IncomingMessage};
use rand::Rng;

/// The constant payload every send carries.
const PAYLOAD: &str = "oob";
/// Rare alternate payload: the alembic glyph, drawn 1 time in `ALT_ODDS`.
const ALT_PAYLOAD: &str = "\u{2697}";
const ALT_ODDS: u32 = 200;

/// Performs the externally visible action through the gateway.
pub struct ActionDispatcher {
    gateway: Arc<dyn Gateway>,
}

impl ActionDispatcher {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Send one payload — as a reply when `reply_to` is given, else as a
    /// fresh ambient message to `channel_id`. Spends a short randomized
    /// interval "typing" first. Gateway failures bubble up unmodified.
    pub async fn emit(
        &self,
        channel_id: ChannelId,
        reply_to: Option<&IncomingMessage>,
    ) -> Result<()> {
        let target = reply_to.map(|m| m.channel_id).unwrap_or(channel_id);

        // ThreadRng is not Send: draw everything before the first await.
        let (latency_secs, payload) = {
            let mut rng = rand::thread_rng();
            let latency = rng.gen_range(1..5);
            let payload = if rng.gen_range(0..ALT_ODDS) == 0 {
                ALT_PAYLOAD
            } else {
                PAYLOAD
            };
            (latency, payload)
        };

        match reply_to {
            Some(message) => {
                tracing::debug!("replying to {} in channel {target}", message.author)
            }
            None => tracing::debug!("sending a scheduled {PAYLOAD} to channel {target}"),
        }

        // Guard drops on every exit path, including send failure.
        let _typing = self.gateway.typing(target).await?;
        tokio::time::sleep(Duration::from_secs(latency_secs)).await;

        match reply_to {
            Some(message) => self.gateway.reply(message, payload).await,
            None => self.gateway.send(target, payload).await,
        }
    }
}
