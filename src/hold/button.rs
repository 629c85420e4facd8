//! The hold-to-confirm state machine.
//!
//! [`HoldButton`] coordinates the gesture recognizers, the progress clock and
//! the session store. It moves through three phases:
//!
//! ```text
//!            PressBegin                 threshold / saturated tick
//!   Idle ───────────────▶ Holding ─────────────────────────────▶ Completed
//!    ▲                       │                                       │
//!    └──── ReleaseOrCancel ──┘ (reset, no action)                    │
//!    └──────────────────── ReleaseOrCancel (no-op) ◀─────────────────┘
//! ```
//!
//! Completion resets the session and stops the clock *before* the action
//! runs, and the `Completed` phase swallows the release of the gesture that
//! completed, so the action fires exactly once per completed hold.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::clock::{ClockTick, ProgressClock};
use super::gesture::{LongPress, LongPressRecognizer, PointerEvent, PointerKind, ReleaseRecognizer};
use super::session::HoldSession;

/// Callback run once per completed hold.
///
/// Any `FnMut()` closure is a `HoldAction`. Implement the trait directly to
/// inspect the session at the moment the action runs; it is always reset.
pub trait HoldAction {
    /// Perform the committed action.
    fn perform(&mut self, session: &HoldSession);
}

impl<F: FnMut()> HoldAction for F {
    fn perform(&mut self, _session: &HoldSession) {
        self()
    }
}

/// Discrete inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldEvent {
    /// Contact began on the button.
    PressBegin,
    /// The progress clock ticked.
    Tick(ClockTick),
    /// Contact persisted for the full duration.
    HoldThresholdReached,
    /// Contact ended, by lift-off or by leaving the button.
    ReleaseOrCancel,
}

/// Coordinator phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No contact.
    Idle,
    /// Contact held, clock running.
    Holding,
    /// The hold completed; waiting for that gesture's contact to end.
    Completed,
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// A new hold session began.
    Started,
    /// The live hold was refreshed.
    Held,
    /// A tick advanced progress to the contained value.
    Progressed(f64),
    /// The hold completed and the action fired.
    Completed,
    /// The hold ended early; no action.
    Cancelled,
    /// The event had no effect.
    Ignored,
}

/// A press-and-hold control.
pub struct HoldButton {
    label: String,
    duration: Duration,
    phase: Phase,
    session: HoldSession,
    clock: ProgressClock,
    long_press: LongPressRecognizer,
    release: ReleaseRecognizer,
    action: Box<dyn HoldAction>,
    completions: u64,
}

impl fmt::Debug for HoldButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoldButton")
            .field("label", &self.label)
            .field("duration", &self.duration)
            .field("phase", &self.phase)
            .field("session", &self.session)
            .field("clock", &self.clock)
            .field("completions", &self.completions)
            .finish_non_exhaustive()
    }
}

impl HoldButton {
    /// Create a control that fires `action` after `duration` of contact.
    pub fn new(
        label: impl Into<String>,
        duration: Duration,
        clock: ProgressClock,
        action: impl HoldAction + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            duration,
            phase: Phase::Idle,
            session: HoldSession::new(),
            clock,
            long_press: LongPressRecognizer::new(duration),
            release: ReleaseRecognizer::new(),
            action: Box::new(action),
            completions: 0,
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Hold threshold.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current coordinator phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> &HoldSession {
        &self.session
    }

    /// The progress clock.
    #[must_use]
    pub fn clock(&self) -> &ProgressClock {
        &self.clock
    }

    /// Number of times the action has fired.
    #[must_use]
    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// Bring the control to rest when it is attached to a host.
    pub fn mount(&mut self) {
        self.clock.stop();
        self.session.reset();
        self.long_press = LongPressRecognizer::new(self.duration);
        self.release = ReleaseRecognizer::new();
        self.phase = Phase::Idle;
    }

    /// Apply one event.
    pub fn handle(&mut self, event: HoldEvent) -> Transition {
        match event {
            HoldEvent::PressBegin => self.press_begin(),
            HoldEvent::Tick(tick) => self.on_tick(tick),
            HoldEvent::HoldThresholdReached => self.on_hold_completed(),
            HoldEvent::ReleaseOrCancel => self.on_release_or_drag_ended(),
        }
    }

    /// Begin a new hold, closing out a completed gesture first.
    pub fn press_begin(&mut self) -> Transition {
        if self.phase == Phase::Completed {
            self.phase = Phase::Idle;
        }
        self.on_hold_changed(true)
    }

    /// Contact persists below the threshold.
    ///
    /// Starts the clock (a no-op while it runs) and records `holding`.
    pub fn on_hold_changed(&mut self, holding: bool) -> Transition {
        let started = match self.phase {
            Phase::Holding => false,
            // The completed gesture is still down; it cannot start another hold.
            Phase::Completed => return Transition::Ignored,
            Phase::Idle if !holding => return Transition::Ignored,
            Phase::Idle => {
                debug_assert!(self.session.is_reset(), "hold started from a dirty session");
                self.phase = Phase::Holding;
                true
            }
        };

        self.clock.start();
        self.session.set_holding(holding);

        if started {
            debug!(
                label = %self.label,
                generation = self.clock.generation(),
                "hold started"
            );
            Transition::Started
        } else {
            Transition::Held
        }
    }

    /// Apply a clock tick; completes the hold when progress saturates.
    pub fn on_tick(&mut self, tick: ClockTick) -> Transition {
        if self.phase != Phase::Holding || !self.clock.accepts(tick) {
            trace!(
                tick = tick.generation,
                live = self.clock.generation(),
                "ignoring stale tick"
            );
            return Transition::Ignored;
        }
        if !self.session.advance(self.clock.granularity(), self.duration) {
            return Transition::Ignored;
        }

        let progress = self.session.progress();
        trace!(progress, elapsed_ms = self.session.elapsed().as_millis() as u64, "tick");
        if self.session.is_saturated() {
            return self.on_hold_completed();
        }
        Transition::Progressed(progress)
    }

    /// The hold reached its full duration.
    pub fn on_hold_completed(&mut self) -> Transition {
        if self.phase != Phase::Holding {
            trace!(phase = ?self.phase, "completion outside a hold ignored");
            return Transition::Ignored;
        }

        self.session.finish();
        let held = self.session.elapsed();
        self.session.reset();
        self.clock.stop();
        self.phase = Phase::Completed;
        self.completions += 1;

        info!(
            label = %self.label,
            held_ms = held.as_millis() as u64,
            completions = self.completions,
            "hold completed"
        );
        self.action.perform(&self.session);
        Transition::Completed
    }

    /// Contact ended. Cancels an incomplete hold; no-op after completion.
    pub fn on_release_or_drag_ended(&mut self) -> Transition {
        match self.phase {
            Phase::Idle => Transition::Ignored,
            Phase::Completed => {
                self.phase = Phase::Idle;
                trace!("release after completion ignored");
                Transition::Ignored
            }
            Phase::Holding => {
                let progress = self.session.progress();
                self.session.reset();
                self.clock.stop();
                self.phase = Phase::Idle;
                debug!(label = %self.label, progress, "hold cancelled");
                Transition::Cancelled
            }
        }
    }

    /// Fire the long-press threshold if it is due at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Transition> {
        match self.long_press.poll(now)? {
            LongPress::Ended => Some(self.on_hold_completed()),
            LongPress::Changed(holding) => Some(self.on_hold_changed(holding)),
        }
    }

    /// Route a pointer sample through both recognizers.
    ///
    /// A threshold due at `now` is committed first, then the long-press
    /// recognizer runs, then the release recognizer, so a release can only
    /// veto a hold that has not completed.
    pub fn pointer(&mut self, event: PointerEvent, now: Instant) -> Vec<Transition> {
        let mut transitions = Vec::with_capacity(3);

        if let Some(t) = self.poll(now) {
            transitions.push(t);
        }

        if event.kind == PointerKind::Down {
            // A new contact means any previous one is over, even if its
            // release never arrived.
            match self.phase {
                Phase::Holding => transitions.push(self.on_release_or_drag_ended()),
                Phase::Completed => self.phase = Phase::Idle,
                Phase::Idle => {}
            }
        }

        match self.long_press.update(event, now) {
            Some(LongPress::Changed(true)) if event.kind == PointerKind::Down => {
                transitions.push(self.press_begin());
            }
            Some(LongPress::Changed(holding)) => transitions.push(self.on_hold_changed(holding)),
            Some(LongPress::Ended) => transitions.push(self.on_hold_completed()),
            None => {}
        }

        if self.release.update(event) {
            transitions.push(self.on_release_or_drag_ended());
        }

        transitions
    }
}
