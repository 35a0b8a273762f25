//! Per-channel schedule registry — owns delay state and timer lifecycle.
//!
//! One `ChannelState` per monitored channel, guarded by a non-async mutex:
//! every mutation happens inside a critical section with no suspension
//! point, so cancel + re-arm is atomic and no observer ever sees zero or two
//! live timers for a channel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use oobot_core::types::ChannelId;

use crate::dispatch::ActionDispatcher;
use crate::policy;
use crate::timer::{TimerState, TimerTask};

struct ChannelState {
    delay_secs: u64,
    pending: Option<TimerTask>,
    /// Timers armed for this channel since bootstrap.
    generation: u64,
}

/// Snapshot of one channel's schedule, for logs and dashboards.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChannelStats {
    pub channel_id: ChannelId,
    pub delay_secs: u64,
    pub timers_created: u64,
    #[serde(skip)]
    pub pending: Option<TimerState>,
}

/// Registry of monitored channels and their pending timers.
pub struct ScheduleRegistry {
    channels: Mutex<HashMap<ChannelId, ChannelState>>,
    dispatcher: Arc<ActionDispatcher>,
}

impl ScheduleRegistry {
    pub fn new(dispatcher: Arc<ActionDispatcher>) -> Arc<Self> {
        Arc::new(Self {
            channels: Mutex::new(HashMap::new()),
            dispatcher,
        })
    }

    /// Create one state record per channel at the maximum delay, then arm
    /// them all.
    pub fn bootstrap(self: &Arc<Self>, channel_ids: &[ChannelId]) {
        let mut channels = self.lock();
        for &channel_id in channel_ids {
            channels.insert(
                channel_id,
                ChannelState {
                    delay_secs: policy::reset(),
                    pending: None,
                    generation: 0,
                },
            );
        }
        for &channel_id in channel_ids {
            self.arm(&mut channels, channel_id);
        }
        drop(channels);
        tracing::info!("⏰ schedule armed for {} channel(s)", channel_ids.len());
    }

    /// Replace the pending timer for a channel with a fresh jittered one.
    /// Unmonitored channels are ignored.
    pub fn schedule(self: &Arc<Self>, channel_id: ChannelId) {
        let mut channels = self.lock();
        self.arm(&mut channels, channel_id);
    }

    /// Shrink the channel's delay after observed activity. Does not
    /// reschedule — callers follow up with [`schedule`](Self::schedule).
    pub fn on_activity(&self, channel_id: ChannelId) {
        let mut channels = self.lock();
        if let Some(state) = channels.get_mut(&channel_id) {
            state.delay_secs = policy::decay(state.delay_secs);
            tracing::debug!(
                "channel {channel_id} delay decayed to {}",
                policy::describe(state.delay_secs)
            );
        }
    }

    pub fn is_monitored(&self, channel_id: ChannelId) -> bool {
        self.lock().contains_key(&channel_id)
    }

    /// Current delay for a monitored channel.
    pub fn current_delay(&self, channel_id: ChannelId) -> Option<u64> {
        self.lock().get(&channel_id).map(|s| s.delay_secs)
    }

    /// Per-channel schedule snapshots, ordered by channel id.
    pub fn stats(&self) -> Vec<ChannelStats> {
        let channels = self.lock();
        let mut stats: Vec<ChannelStats> = channels
            .iter()
            .map(|(&channel_id, state)| ChannelStats {
                channel_id,
                delay_secs: state.delay_secs,
                timers_created: state.generation,
                pending: state.pending.as_ref().map(TimerTask::state),
            })
            .collect();
        stats.sort_by_key(|s| s.channel_id);
        stats
    }

    /// Cancel + create under the held lock; no suspension point in between.
    fn arm(
        self: &Arc<Self>,
        channels: &mut HashMap<ChannelId, ChannelState>,
        channel_id: ChannelId,
    ) {
        let Some(state) = channels.get_mut(&channel_id) else {
            return;
        };
        if let Some(previous) = state.pending.take() {
            previous.cancel(); // no-op if it already fired
        }

        let delay = policy::jitter(state.delay_secs);
        let registry = Arc::downgrade(self);
        let timer = TimerTask::spawn(delay, move || fire(registry, channel_id));
        state.pending = Some(timer);
        state.generation += 1;

        tracing::debug!(
            "⏳ next ambient send to channel {channel_id} in {} ({delay}s)",
            policy::describe(delay)
        );
    }

    /// Timer fire path: dispatch independently, relax the delay, arm the
    /// successor — the successor exists whether or not the send works out.
    fn fired(self: &Arc<Self>, channel_id: ChannelId) {
        // The send runs as its own task: a reschedule racing in from a new
        // message must never queue behind the typing latency.
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            if let Err(e) = dispatcher.emit(channel_id, None).await {
                tracing::warn!("⚠️ ambient send to channel {channel_id} failed: {e}");
            }
        });

        let mut channels = self.lock();
        if let Some(state) = channels.get_mut(&channel_id) {
            state.delay_secs = policy::reset();
        }
        self.arm(&mut channels, channel_id);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChannelId, ChannelState>> {
        self.channels.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Timer bodies hold a `Weak` so the process-lifetime registry is not made
/// self-referential through its own pending timers.
fn fire(registry: Weak<ScheduleRegistry>, channel_id: ChannelId) {
    if let Some(registry) = registry.upgrade() {
        registry.fired(channel_id);
    }
}
