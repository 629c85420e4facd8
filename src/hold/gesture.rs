//! Gesture recognizers feeding the hold state machine.
//!
//! Two recognizers watch the same pointer stream:
//!
//! - [`LongPressRecognizer`] reports contact that begins on the button and
//!   fires once when it has persisted for the minimum duration.
//! - [`ReleaseRecognizer`] reports the end of contact, either lift-off or
//!   the pointer leaving the contact shape.
//!
//! They never talk to each other; [`HoldButton::pointer`](super::HoldButton::pointer)
//! runs them in a fixed order.

use std::time::{Duration, Instant};

/// Phase of a raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Contact began.
    Down,
    /// Contact moved while held.
    Moved,
    /// Contact lifted.
    Up,
}

/// One pointer sample, already hit-tested against the contact shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What the pointer did.
    pub kind: PointerKind,
    /// Whether the sample lies inside the contact shape.
    pub inside: bool,
}

impl PointerEvent {
    /// Contact began at a position.
    pub fn down(inside: bool) -> Self {
        Self {
            kind: PointerKind::Down,
            inside,
        }
    }

    /// Contact moved to a position.
    pub fn moved(inside: bool) -> Self {
        Self {
            kind: PointerKind::Moved,
            inside,
        }
    }

    /// Contact lifted at a position.
    pub fn up(inside: bool) -> Self {
        Self {
            kind: PointerKind::Up,
            inside,
        }
    }
}

/// Output of the long-press recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongPress {
    /// Contact persists and has not reached the minimum duration.
    Changed(bool),
    /// Contact persisted for the minimum duration.
    Ended,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    started: Instant,
    ended: bool,
}

/// Detects contact held for a minimum duration.
#[derive(Debug, Clone)]
pub struct LongPressRecognizer {
    minimum_duration: Duration,
    press: Option<Press>,
}

impl LongPressRecognizer {
    /// Create a recognizer firing after `minimum_duration` of contact.
    pub fn new(minimum_duration: Duration) -> Self {
        Self {
            minimum_duration,
            press: None,
        }
    }

    /// Whether a press is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.press.is_some()
    }

    /// Feed a pointer sample.
    pub fn update(&mut self, event: PointerEvent, now: Instant) -> Option<LongPress> {
        match event.kind {
            PointerKind::Down if event.inside => {
                self.press = Some(Press {
                    started: now,
                    ended: false,
                });
                Some(LongPress::Changed(true))
            }
            PointerKind::Down => {
                self.press = None;
                None
            }
            PointerKind::Moved => match self.press {
                Some(press) if !press.ended && event.inside => Some(LongPress::Changed(true)),
                Some(_) if !event.inside => {
                    // Moving off the shape fails the gesture.
                    self.press = None;
                    None
                }
                _ => None,
            },
            PointerKind::Up => {
                self.press = None;
                None
            }
        }
    }

    /// Fire [`LongPress::Ended`] once the minimum duration has passed.
    pub fn poll(&mut self, now: Instant) -> Option<LongPress> {
        let press = self.press.as_mut()?;
        if press.ended || now.saturating_duration_since(press.started) < self.minimum_duration {
            return None;
        }
        press.ended = true;
        Some(LongPress::Ended)
    }
}

/// Detects the end of contact, at any distance from the start.
#[derive(Debug, Clone, Default)]
pub struct ReleaseRecognizer {
    active: bool,
}

impl ReleaseRecognizer {
    /// Create an idle recognizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether contact that began on the shape is still down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed a pointer sample; returns `true` when contact ended.
    pub fn update(&mut self, event: PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down => {
                self.active = event.inside;
                false
            }
            PointerKind::Moved if self.active && !event.inside => {
                self.active = false;
                true
            }
            PointerKind::Moved => false,
            PointerKind::Up => std::mem::take(&mut self.active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_long_press_down_inside_reports_changed() {
        let mut recognizer = LongPressRecognizer::new(SECOND);
        let now = Instant::now();
        assert_eq!(
            recognizer.update(PointerEvent::down(true), now),
            Some(LongPress::Changed(true))
        );
        assert!(recognizer.is_tracking());
    }

    #[test]
    fn test_long_press_down_outside_is_ignored() {
        let mut recognizer = LongPressRecognizer::new(SECOND);
        assert_eq!(recognizer.update(PointerEvent::down(false), Instant::now()), None);
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn test_long_press_fires_once_after_minimum() {
        let mut recognizer = LongPressRecognizer::new(SECOND);
        let start = Instant::now();
        recognizer.update(PointerEvent::down(true), start);

        assert_eq!(recognizer.poll(start + Duration::from_millis(999)), None);
        assert_eq!(recognizer.poll(start + SECOND), Some(LongPress::Ended));
        assert_eq!(recognizer.poll(start + SECOND * 2), None);
    }

    #[test]
    fn test_long_press_move_inside_keeps_changing() {
        let mut recognizer = LongPressRecognizer::new(SECOND);
        let start = Instant::now();
        recognizer.update(PointerEvent::down(true), start);
        assert_eq!(
            recognizer.update(PointerEvent::moved(true), start),
            Some(LongPress::Changed(true))
        );
    }

    #[test]
    fn test_long_press_move_outside_fails() {
        let mut recognizer = LongPressRecognizer::new(SECOND);
        let start = Instant::now();
        recognizer.update(PointerEvent::down(true), start);
        assert_eq!(recognizer.update(PointerEvent::moved(false), start), None);
        assert_eq!(recognizer.poll(start + SECOND), None);
    }

    #[test]
    fn test_long_press_up_clears() {
        let mut recognizer = LongPressRecognizer::new(SECOND);
        let start = Instant::now();
        recognizer.update(PointerEvent::down(true), start);
        recognizer.update(PointerEvent::up(true), start);
        assert!(!recognizer.is_tracking());
        assert_eq!(recognizer.poll(start + SECOND), None);
    }

    #[test]
    fn test_release_fires_on_up_after_down_inside() {
        let mut recognizer = ReleaseRecognizer::new();
        assert!(!recognizer.update(PointerEvent::down(true)));
        assert!(recognizer.is_active());
        assert!(recognizer.update(PointerEvent::up(true)));
        assert!(!recognizer.is_active());
    }

    #[test]
    fn test_release_fires_when_dragged_off() {
        let mut recognizer = ReleaseRecognizer::new();
        recognizer.update(PointerEvent::down(true));
        assert!(!recognizer.update(PointerEvent::moved(true)));
        assert!(recognizer.update(PointerEvent::moved(false)));
        // The later lift belongs to a gesture that already ended.
        assert!(!recognizer.update(PointerEvent::up(false)));
    }

    #[test]
    fn test_release_ignores_contact_that_began_elsewhere() {
        let mut recognizer = ReleaseRecognizer::new();
        recognizer.update(PointerEvent::down(false));
        assert!(!recognizer.update(PointerEvent::moved(true)));
        assert!(!recognizer.update(PointerEvent::up(true)));
    }
}
