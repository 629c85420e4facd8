//! Command implementations for the longpress CLI.
//!
//! This module contains the actual implementations of CLI commands,
//! separated from the argument parsing definitions in cli/mod.rs.

pub mod completions;
pub mod config;
pub mod run;
pub mod simulate;
