//! Cancellable single-fire timers.
//!
//! A `TimerTask` is armed for one channel, fires exactly once after its
//! delay, and can be cancelled right up to the moment it fires. Firing is an
//! atomic boundary: whichever of fire/cancel wins the state transition
//! decides whether the body ever runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

const SCHEDULED: u8 = 0;
const CANCELLED: u8 = 1;
const FIRED: u8 = 2;

/// Lifecycle of a timer: `Scheduled` until it either fires or is superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Scheduled,
    Cancelled,
    Fired,
}

/// A single-fire deferred operation with a cancellation handle.
pub struct TimerTask {
    state: Arc<AtomicU8>,
    handle: JoinHandle<()>,
    delay_secs: u64,
}

impl TimerTask {
    /// Arm a timer that runs `on_fire` once after `delay_secs`, unless
    /// cancelled first. The body is synchronous: fire-time work that needs
    /// to suspend (like a send) must be spawned by the caller, where a later
    /// cancel cannot abort it mid-flight.
    pub fn spawn<F>(delay_secs: u64, on_fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let state = Arc::new(AtomicU8::new(SCHEDULED));
        let task_state = state.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
            // Lose this race to a cancel and the body never runs.
            if task_state
                .compare_exchange(SCHEDULED, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                on_fire();
            }
        });
        Self {
            state,
            handle,
            delay_secs,
        }
    }

    /// Cancel a not-yet-fired timer, discarding all its future side effects.
    /// Cancelling after the fire is a no-op.
    pub fn cancel(&self) {
        if self
            .state
            .compare_exchange(SCHEDULED, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.handle.abort();
        }
    }

    pub fn state(&self) -> TimerState {
        match self.state.load(Ordering::Acquire) {
            CANCELLED => TimerState::Cancelled,
            FIRED => TimerState::Fired,
            _ => TimerState::Scheduled,
        }
    }

    /// The delay this timer was armed with.
    pub fn delay_secs(&self) -> u64 {
        self.delay_secs
    }
}

/// A timer is exclusively owned by whoever armed it: losing the handle means
/// losing the schedule slot, so an un-cancelled drop must not leave a live
/// task behind.
impl Drop for TimerTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
