//! # oobot Scheduler
//!
//! The adaptive message-scheduling core: decides when the agent speaks up in
//! each monitored channel, tightens the schedule when a channel gets busy,
//! and relaxes it back to the 72-hour ceiling after every send.
//!
//! ## Architecture
//! ```text
//! Gateway events
//!   └── EventRouter
//!         ├── DM / mention → ActionDispatcher (immediate reply)
//!         └── monitored chatter → ScheduleRegistry
//!               ├── decay(delay)  — activity compresses the wait
//!               └── schedule()    — cancel + re-arm one TimerTask per channel
//!
//! TimerTask fires
//!   ├── ActionDispatcher (own task — never blocks the registry)
//!   ├── delay = MAX
//!   └── schedule()  — the next generation, unconditionally
//! ```
//!
//! Every channel always has exactly one live timer between `schedule` calls,
//! and a firing timer always arms its successor — the schedule never stops,
//! even when a send fails.

pub mod dispatch;
pub mod policy;
pub mod registry;
pub mod router;
pub mod timer;

pub use dispatch::ActionDispatcher;
pub use registry::{ChannelStats, ScheduleRegistry};
pub use router::EventRouter;
pub use timer::{TimerState, TimerTask};
