//! Completions command implementation.
//!
//! This module implements the `longpress completions` command for generating shell completions.

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Result type for completions command operations.
pub type CompletionsCommandResult = Result<(), CompletionsCommandError>;

/// Error type for completions command operations.
#[derive(Debug, thiserror::Error)]
pub enum CompletionsCommandError {
    /// The specified shell is not supported for completions.
    #[error("Unsupported shell: {0}")]
    UnsupportedShell(String),
}

/// Parse a shell name accepted by the completions command.
pub fn parse_shell(shell: &str) -> Result<Shell, CompletionsCommandError> {
    match shell {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        _ => Err(CompletionsCommandError::UnsupportedShell(shell.to_string())),
    }
}

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: &str, out: &mut dyn Write) -> CompletionsCommandResult {
    let shell = parse_shell(shell)?;
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "longpress", out);
    Ok(())
}

/// Execute the completions command.
pub fn completions(shell: &str) -> CompletionsCommandResult {
    write_completions(shell, &mut io::stdout())
}
