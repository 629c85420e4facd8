//! In-flight state of a single press attempt.
//!
//! A [`HoldSession`] is owned exclusively by its [`HoldButton`](super::HoldButton).
//! Only two paths mutate it: [`HoldSession::reset`], which restores every
//! field, and [`HoldSession::advance`], the clock's increment of `elapsed`
//! (with `progress` derived from it).

use std::time::Duration;

/// The mutable fields shared by the gesture coordinator and the progress clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldSession {
    holding: bool,
    finished: bool,
    elapsed: Duration,
    progress: f64,
}

impl HoldSession {
    /// Create a session in its zero state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether contact is currently being held.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Whether the hold reached its full duration.
    ///
    /// Only observable between completion and the reset that follows it.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Accumulated hold time.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Normalised progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether progress has saturated.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.progress >= 1.0
    }

    /// Whether every field holds its zero value.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        *self == Self::default()
    }

    /// Mark the session as holding or not.
    pub fn set_holding(&mut self, holding: bool) {
        self.holding = holding;
    }

    /// Mark the hold as finished.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Add one tick of `step` and recompute progress against `duration`.
    ///
    /// No-op unless holding with progress below 1. Returns whether the
    /// session changed.
    pub fn advance(&mut self, step: Duration, duration: Duration) -> bool {
        if !self.holding || self.is_saturated() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(step);
        self.progress = ratio(self.elapsed, duration);
        true
    }

    /// Restore the zero state.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.progress = 0.0;
        self.holding = false;
        self.finished = false;
    }
}

/// `elapsed / duration`, clamped to `[0, 1]`. A zero duration is always complete.
pub fn ratio(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}
