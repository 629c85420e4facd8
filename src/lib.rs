//! longpress - a button you have to hold down.
//!
//! The control only commits to its action once contact has been held for a
//! configured duration, drawing a progress fill while the hold lasts.
//! Letting go early, or moving off the button, cancels cleanly.
//!
//! The core lives in [`hold`]; [`tui`] renders it in a terminal and
//! [`cli`] wraps both in the `longpress` binary.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod hold;
pub mod logging;
pub mod tui;

// Re-export key types for convenience
pub use hold::{HoldAction, HoldButton, HoldEvent, HoldSession, Phase, ProgressClock, Transition};
