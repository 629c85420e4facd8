//! Terminal host for the hold button.
//!
//! Shows a counter above a [`HoldButtonWidget`] and feeds mouse (and, where
//! the terminal reports key releases, keyboard) input to the button.

mod app;
mod ui;
pub mod widget;

pub use app::{TuiApp, TuiState};
pub use widget::{ButtonStyle, HoldButtonWidget};
