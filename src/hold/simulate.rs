//! Headless driver that runs holds on a virtual timeline.
//!
//! Ticks come from a manual [`ProgressClock`] and the long-press threshold is
//! polled at the same virtual instants, so a run is fully deterministic.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::button::{HoldButton, Transition};
use super::clock::ProgressClock;
use super::gesture::PointerEvent;
use super::session::HoldSession;
use super::MAX_DURATION;

/// Error type for simulation setup.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The hold duration must be positive.
    #[error("hold duration must be greater than zero")]
    ZeroDuration,
    /// The tick granularity must be positive.
    #[error("tick granularity must be greater than zero")]
    ZeroGranularity,
    /// Ticks finer than a millisecond are not simulated.
    #[error("tick granularity must be at least 1ms")]
    GranularityTooFine,
    /// A duration, press length or granularity above [`MAX_DURATION`].
    #[error("{0} must be at most {max}s", max = MAX_DURATION.as_secs())]
    TooLong(&'static str),
    /// The virtual timeline ran past what `Instant` can represent.
    #[error("simulated timeline overflowed")]
    TimelineOverflow,
}

/// Parameters for a simulated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Label of the simulated button.
    pub label: String,
    /// Hold threshold of the button.
    pub duration: Duration,
    /// Clock tick interval.
    pub granularity: Duration,
    /// How long each press is held before lifting.
    pub hold: Duration,
    /// Send one extra release after each lift.
    pub stray_release: bool,
    /// Number of presses.
    pub repeat: u32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            label: "Hold to Increase".to_string(),
            duration: Duration::from_secs(1),
            granularity: super::clock::DEFAULT_GRANULARITY,
            hold: Duration::from_secs(1),
            stray_release: false,
            repeat: 1,
        }
    }
}

/// How one press ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The action fired.
    Completed,
    /// Contact ended early.
    Cancelled,
}

/// Serializable view of a [`HoldSession`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Whether contact was held.
    pub holding: bool,
    /// Whether the hold had finished.
    pub finished: bool,
    /// Accumulated hold time in milliseconds.
    pub elapsed_ms: u64,
    /// Progress in `[0, 1]`.
    pub progress: f64,
}

impl From<&HoldSession> for SessionSnapshot {
    fn from(session: &HoldSession) -> Self {
        Self {
            holding: session.is_holding(),
            finished: session.is_finished(),
            elapsed_ms: session.elapsed().as_millis() as u64,
            progress: session.progress(),
        }
    }
}

/// Result of a simulated run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Hold threshold in milliseconds.
    pub duration_ms: u64,
    /// Tick interval in milliseconds.
    pub granularity_ms: u64,
    /// Contact time per press in milliseconds.
    pub hold_ms: u64,
    /// Ticks that advanced progress.
    pub ticks_applied: u64,
    /// Highest progress observed.
    pub peak_progress: f64,
    /// Times the action fired.
    pub completions: u64,
    /// Presses that ended early.
    pub cancellations: u64,
    /// Per-press outcome, in order.
    pub outcomes: Vec<Outcome>,
    /// Session state after the last event.
    pub final_session: SessionSnapshot,
}

fn check(scenario: &Scenario) -> Result<(), SimulationError> {
    if scenario.duration.is_zero() {
        return Err(SimulationError::ZeroDuration);
    }
    if scenario.granularity.is_zero() {
        return Err(SimulationError::ZeroGranularity);
    }
    if scenario.granularity < Duration::from_millis(1) {
        return Err(SimulationError::GranularityTooFine);
    }
    let limits = [
        (scenario.duration, "hold duration"),
        (scenario.hold, "press length"),
        (scenario.granularity, "tick granularity"),
    ];
    match limits.iter().find(|(d, _)| *d > MAX_DURATION) {
        Some((_, what)) => Err(SimulationError::TooLong(*what)),
        None => Ok(()),
    }
}

fn record(t: Transition, report: &mut SimulationReport, outcome: &mut Option<Outcome>) {
    match t {
        Transition::Progressed(p) => report.peak_progress = report.peak_progress.max(p),
        Transition::Completed => {
            report.peak_progress = 1.0;
            *outcome = Some(Outcome::Completed);
        }
        Transition::Cancelled => *outcome = Some(Outcome::Cancelled),
        _ => {}
    }
}

/// Run `scenario` against a fresh button.
///
/// A press stops stepping as soon as it completes; the lift is still
/// delivered at the end of the press.
pub fn simulate(scenario: &Scenario) -> Result<SimulationReport, SimulationError> {
    check(scenario)?;

    let fired = Rc::new(Cell::new(0u64));
    let counter = fired.clone();
    let mut button = HoldButton::new(
        scenario.label.clone(),
        scenario.duration,
        ProgressClock::manual(scenario.granularity),
        move || counter.set(counter.get() + 1),
    );
    button.mount();

    let mut report = SimulationReport {
        duration_ms: scenario.duration.as_millis() as u64,
        granularity_ms: scenario.granularity.as_millis() as u64,
        hold_ms: scenario.hold.as_millis() as u64,
        ticks_applied: 0,
        peak_progress: 0.0,
        completions: 0,
        cancellations: 0,
        outcomes: Vec::new(),
        final_session: SessionSnapshot::from(button.session()),
    };

    let steps = (scenario.hold.as_nanos() / scenario.granularity.as_nanos()) as u64;
    let advance = |from: Instant, by: Duration| {
        from.checked_add(by).ok_or(SimulationError::TimelineOverflow)
    };
    let mut origin = Instant::now();

    for _ in 0..scenario.repeat {
        let mut outcome = None;
        for t in button.pointer(PointerEvent::down(true), origin) {
            record(t, &mut report, &mut outcome);
        }

        let mut now = origin;
        for _ in 0..steps {
            if outcome.is_some() {
                break;
            }
            now = advance(now, scenario.granularity)?;
            if let Some(tick) = button.clock().tick() {
                let t = button.on_tick(tick);
                if t != Transition::Ignored {
                    report.ticks_applied += 1;
                }
                record(t, &mut report, &mut outcome);
            }
            if let Some(t) = button.poll(now) {
                record(t, &mut report, &mut outcome);
            }
        }

        let lift = advance(origin, scenario.hold)?;
        for t in button.pointer(PointerEvent::up(true), lift) {
            record(t, &mut report, &mut outcome);
        }
        if scenario.stray_release {
            let t = button.on_release_or_drag_ended();
            record(t, &mut report, &mut outcome);
        }

        let outcome = outcome.unwrap_or(Outcome::Cancelled);
        if outcome == Outcome::Cancelled {
            report.cancellations += 1;
        }
        report.outcomes.push(outcome);
        origin = advance(lift, scenario.granularity)?;
    }

    report.completions = fired.get();
    report.final_session = SessionSnapshot::from(button.session());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(hold_ms: u64) -> Scenario {
        Scenario {
            hold: Duration::from_millis(hold_ms),
            ..Scenario::default()
        }
    }

    #[test]
    fn test_full_hold_applies_hundred_ticks() {
        let report = simulate(&scenario(1000)).unwrap();
        assert_eq!(report.ticks_applied, 100);
        assert_eq!(report.peak_progress, 1.0);
        assert_eq!(report.completions, 1);
        assert_eq!(report.outcomes, vec![Outcome::Completed]);
        assert_eq!(report.final_session.elapsed_ms, 0);
        assert!(!report.final_session.holding);
    }

    #[test]
    fn test_short_hold_is_cancelled() {
        let report = simulate(&scenario(300)).unwrap();
        assert_eq!(report.completions, 0);
        assert_eq!(report.cancellations, 1);
        assert!(report.peak_progress < 1.0);
        assert!((report.peak_progress - 0.3).abs() < 1e-9);
        assert_eq!(report.final_session.progress, 0.0);
    }

    #[test]
    fn test_stray_release_keeps_single_completion() {
        let report = simulate(&Scenario {
            stray_release: true,
            ..scenario(1000)
        })
        .unwrap();
        assert_eq!(report.completions, 1);
        assert_eq!(report.cancellations, 0);
    }

    #[test]
    fn test_long_hold_fires_once() {
        let report = simulate(&scenario(3000)).unwrap();
        assert_eq!(report.completions, 1);
        assert_eq!(report.ticks_applied, 100);
    }

    #[test]
    fn test_repeat_does_not_carry_progress() {
        let report = simulate(&Scenario {
            repeat: 3,
            ..scenario(600)
        })
        .unwrap();
        assert_eq!(report.completions, 0);
        assert_eq!(report.cancellations, 3);
        assert!((report.peak_progress - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_repeat_full_holds_fire_each_time() {
        let report = simulate(&Scenario {
            repeat: 4,
            stray_release: true,
            ..scenario(1000)
        })
        .unwrap();
        assert_eq!(report.completions, 4);
        assert_eq!(report.outcomes, vec![Outcome::Completed; 4]);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = simulate(&Scenario {
            duration: Duration::ZERO,
            ..Scenario::default()
        });
        assert!(matches!(result, Err(SimulationError::ZeroDuration)));
    }

    #[test]
    fn test_zero_granularity_rejected() {
        let result = simulate(&Scenario {
            granularity: Duration::ZERO,
            ..Scenario::default()
        });
        assert!(matches!(result, Err(SimulationError::ZeroGranularity)));
    }

    #[test]
    fn test_report_serialises() {
        let report = simulate(&scenario(1000)).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["completions"], 1);
        assert_eq!(json["outcomes"][0], "completed");
        assert_eq!(json["final_session"]["elapsed_ms"], 0);
    }

    #[test]
    fn test_oversized_inputs_rejected() {
        let huge = Duration::from_secs(10_000_000_000_000_000_000);
        let long_hold = simulate(&Scenario {
            hold: huge,
            ..Scenario::default()
        });
        assert!(matches!(long_hold, Err(SimulationError::TooLong("press length"))));

        let coarse = simulate(&Scenario {
            granularity: Duration::from_millis(u64::MAX),
            ..Scenario::default()
        });
        assert!(matches!(coarse, Err(SimulationError::TooLong("tick granularity"))));

        let slow = simulate(&Scenario {
            duration: MAX_DURATION + Duration::from_secs(1),
            ..Scenario::default()
        });
        assert!(matches!(slow, Err(SimulationError::TooLong("hold duration"))));
    }

    #[test]
    fn test_sub_millisecond_granularity_rejected() {
        let result = simulate(&Scenario {
            granularity: Duration::from_micros(10),
            ..Scenario::default()
        });
        assert!(matches!(result, Err(SimulationError::GranularityTooFine)));
    }

    #[test]
    fn test_longest_press_stops_stepping_after_completion() {
        let started = Instant::now();
        let report = simulate(&Scenario {
            hold: MAX_DURATION,
            granularity: Duration::from_millis(1),
            repeat: 20,
            ..Scenario::default()
        })
        .unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(report.completions, 20);
        assert_eq!(report.ticks_applied, 20 * 1000);
        assert_eq!(report.final_session.elapsed_ms, 0);
    }
}
