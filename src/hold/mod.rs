//! Press-and-hold control core.
//!
//! - [`session`]: the mutable hold state and its reset
//! - [`clock`]: the cancellable periodic tick source
//! - [`gesture`]: long-press and release recognizers
//! - [`button`]: the state machine tying them together
//! - [`simulate`]: a deterministic headless driver

pub mod button;
pub mod clock;
pub mod gesture;
pub mod session;
pub mod simulate;

use std::time::Duration;

/// Longest hold duration, press or tick interval the control accepts.
pub const MAX_DURATION: Duration = Duration::from_secs(60 * 60);

pub use button::{HoldAction, HoldButton, HoldEvent, Phase, Transition};
pub use clock::{ClockTick, ProgressClock, TickDriver, DEFAULT_GRANULARITY};
pub use gesture::{PointerEvent, PointerKind};
pub use session::HoldSession;
pub use simulate::{simulate, Scenario, SimulationError, SimulationReport};
