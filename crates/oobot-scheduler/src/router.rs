//! Event router — classifies gateway events and drives the schedule.

use std::sync::Arc;

use oobot_core::config::AmbientConfig;
use oobot_core::error::Result;
use oobot_core::traits::{Gateway, PresenceStatus};
use oobot_core::types::{ChannelId, ChatEvent, IncomingMessage};
use rand::Rng;

use crate::dispatch::ActionDispatcher;
use crate::registry::ScheduleRegistry;

/// Entry point the hosting process wires to the gateway's event dispatch.
pub struct EventRouter {
    gateway: Arc<dyn Gateway>,
    registry: Arc<ScheduleRegistry>,
    dispatcher: Arc<ActionDispatcher>,
    channels: Vec<ChannelId>,
    ambient: AmbientConfig,
}

impl EventRouter {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        channels: Vec<ChannelId>,
        ambient: AmbientConfig,
    ) -> Self {
        let dispatcher = Arc::new(ActionDispatcher::new(gateway.clone()));
        let registry = ScheduleRegistry::new(dispatcher.clone());
        Self {
            gateway,
            registry,
            dispatcher,
            channels,
            ambient,
        }
    }

    /// Route one gateway event.
    pub async fn handle(&self, event: ChatEvent) -> Result<()> {
        match event {
            ChatEvent::Ready => {
                self.on_ready().await;
                Ok(())
            }
            ChatEvent::Message(message) => self.on_message(&message).await,
        }
    }

    /// The gateway is connected: advertise presence, resolve the configured
    /// channels, arm the schedule. A channel that fails to resolve is logged
    /// and dropped; the rest proceed.
    pub async fn on_ready(&self) {
        if let Err(e) = self
            .gateway
            .set_presence(PresenceStatus::Idle, &self.ambient.presence)
            .await
        {
            tracing::warn!("⚠️ presence update failed: {e}");
        }

        let mut resolved = Vec::with_capacity(self.channels.len());
        for &channel_id in &self.channels {
            match self.gateway.describe_channel(channel_id).await {
                Ok(desc) => {
                    tracing::info!("👀 watching {desc}");
                    resolved.push(channel_id);
                }
                Err(e) => tracing::error!("❌ cannot watch channel {channel_id}: {e}"),
            }
        }
        self.registry.bootstrap(&resolved);
    }

    /// Classify one inbound message. Immediate-reply dispatch failures
    /// bubble up to the host for logging; every other path is infallible.
    pub async fn on_message(&self, message: &IncomingMessage) -> Result<()> {
        // Never respond to our own sends (infinite loop otherwise).
        let me = self.gateway.current_user();
        if message.author == me {
            return Ok(());
        }

        // DMs and mentions get an immediate reply, monitored or not. This
        // path never touches the registry.
        if message.is_direct || message.mentions(me) {
            return self.dispatcher.emit(message.channel_id, Some(message)).await;
        }

        if self.registry.is_monitored(message.channel_id) {
            if !self.activity_qualifies() {
                return Ok(());
            }
            self.registry.on_activity(message.channel_id);
            self.registry.schedule(message.channel_id);
        }
        Ok(())
    }

    /// Ambient chatter tightens the schedule either always or behind a
    /// configured coin-flip.
    fn activity_qualifies(&self) -> bool {
        match self.ambient.reply_probability {
            Some(p) => rand::thread_rng().gen_bool(p.clamp(0.0, 1.0)),
            None => true,
        }
    }

    /// The schedule registry, for stats surfaces.
    pub fn registry(&self) -> &Arc<ScheduleRegistry> {
        &self.registry
    }
}
