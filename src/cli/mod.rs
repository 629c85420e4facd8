//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions and command implementations.

pub mod commands;

use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::config::LongPressConfig;
use crate::hold::Scenario;
use crate::logging::{self, LogTarget};

pub use std::process::ExitCode;

/// Result of running a command.
pub type CliResult = anyhow::Result<ExitCode>;

/// A button you have to hold down.
///
/// Keep contact for the configured duration and the button fires its action;
/// let go early and nothing happens.
#[derive(Parser, Debug)]
#[command(name = "longpress")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run; none prints a quick start.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for longpress.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive demo.
    ///
    /// Shows a counter above a hold button. Hold the left mouse button on it
    /// (or Space, on terminals that report key releases) until the fill
    /// completes to increase the counter.
    ///
    /// Examples:
    ///   longpress run                        # Defaults from .longpress/config.json
    ///   longpress run --duration 2           # Hold for two seconds
    ///   longpress run --text "Hold to Delete"
    Run(RunCommand),

    /// Drive the button on a virtual timeline and report what happened.
    ///
    /// Ticks are applied at the configured granularity without waiting, so
    /// the run is deterministic.
    ///
    /// Examples:
    ///   longpress simulate                   # Hold for the full duration
    ///   longpress simulate --hold 0.3        # Let go early
    ///   longpress simulate --stray-release   # Extra release after completing
    ///   longpress simulate --repeat 3 --json
    Simulate(SimulateCommand),

    /// Manage longpress configuration.
    ///
    /// View, set, and understand config parameters without editing JSON directly.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions.
    ///
    /// Outputs completion script to stdout for bash, zsh, or fish.
    Completions(CompletionsCommand),
}

/// Arguments for the 'run' command.
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Button label.
    #[arg(long)]
    pub text: Option<String>,

    /// Seconds the button must be held.
    #[arg(short = 'd', long, value_parser = parse_secs)]
    pub duration: Option<f64>,
}

/// Arguments for the 'simulate' command.
#[derive(Args, Debug)]
pub struct SimulateCommand {
    /// Seconds each press is held. Defaults to the hold duration.
    #[arg(long, value_parser = parse_secs)]
    pub hold: Option<f64>,

    /// Seconds the button must be held.
    #[arg(short = 'd', long, value_parser = parse_secs)]
    pub duration: Option<f64>,

    /// Clock tick interval in milliseconds.
    #[arg(short = 'g', long)]
    pub granularity_ms: Option<u64>,

    /// Send an extra release after each press ends.
    #[arg(long)]
    pub stray_release: bool,

    /// Number of presses.
    #[arg(short = 'r', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Subcommands for config management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    ///
    /// Displays all config sections and their current values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation for nested keys (e.g., button.duration_secs).
    Get(ConfigGetCommand),

    /// Set a config value.
    ///
    /// Use dot notation for keys. Values are validated before saving.
    Set(ConfigSetCommand),

    /// Reset config to defaults.
    ///
    /// Can reset a specific key, a section, or all config.
    Reset(ConfigResetCommand),

    /// Show documentation for config keys.
    ///
    /// Displays description, type, default value, and examples.
    Explain(ConfigExplainCommand),

    /// List all valid config keys.
    Keys(ConfigKeysCommand),
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g., 'button', 'clock').
    #[arg(short = 's', long)]
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation (e.g., button.duration_secs).
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation (e.g., button.duration_secs).
    pub key: String,

    /// Value to set.
    pub value: String,
}

/// Arguments for 'config reset' command.
#[derive(Args, Debug)]
pub struct ConfigResetCommand {
    /// Key or section to reset. If omitted, resets all config.
    pub key: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for 'config explain' command.
#[derive(Args, Debug)]
pub struct ConfigExplainCommand {
    /// Config key to explain. If omitted, lists all keys with brief descriptions.
    pub key: Option<String>,
}

/// Arguments for 'config keys' command.
#[derive(Args, Debug)]
pub struct ConfigKeysCommand {}

/// Arguments for the 'completions' command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

/// Parse a non-negative number of seconds.
fn parse_secs(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number of seconds"))?;
    if secs.is_finite() && secs >= 0.0 {
        Ok(secs)
    } else {
        Err(format!("`{s}` must be a non-negative number of seconds"))
    }
}

fn secs_to_duration(flag: &str, secs: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(secs).with_context(|| format!("--{flag} {secs} is out of range"))
}

/// Print an error in the house style and map the result to an exit code.
pub fn handle_result(result: CliResult) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Command implementations
// ============================================================================

impl RunCommand {
    /// Apply the flags on top of the loaded config.
    pub fn apply(&self, config: &mut LongPressConfig) -> anyhow::Result<()> {
        if let Some(text) = &self.text {
            config.set_by_path("button.text", text)?;
        }
        if let Some(duration) = self.duration {
            config.set_by_path("button.duration_secs", &duration.to_string())?;
        }
        Ok(())
    }

    /// Execute the run command - opens the interactive demo.
    pub fn execute(&self) -> CliResult {
        let mut config = LongPressConfig::load(None)?;
        self.apply(&mut config)?;

        let count = commands::run::run_demo(&config)?;
        println!("\x1b[32m✓\x1b[0m Counter finished at {count}");
        Ok(ExitCode::SUCCESS)
    }
}

impl SimulateCommand {
    /// Build the scenario from the flags, falling back to `config`.
    pub fn scenario(&self, config: &LongPressConfig) -> anyhow::Result<Scenario> {
        let duration = match self.duration {
            Some(secs) => secs_to_duration("duration", secs)?,
            None => config.button.duration(),
        };
        let hold = match self.hold {
            Some(secs) => secs_to_duration("hold", secs)?,
            None => duration,
        };
        let granularity = self
            .granularity_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.clock.granularity());

        Ok(Scenario {
            label: config.button.text.clone(),
            duration,
            granularity,
            hold,
            stray_release: self.stray_release,
            repeat: self.repeat,
        })
    }

    /// Execute the simulate command.
    pub fn execute(&self) -> CliResult {
        let config = LongPressConfig::load(None)?;
        logging::init(&config.log, LogTarget::Stderr)?;

        let scenario = self.scenario(&config)?;
        commands::simulate::simulate_command(&scenario, self.json)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigShowCommand {
    /// Execute the config show command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_show(self.section.as_deref())?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigGetCommand {
    /// Execute the config get command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_get(&self.key)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigSetCommand {
    /// Execute the config set command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_set(&self.key, &self.value)?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigResetCommand {
    /// Execute the config reset command.
    pub fn execute(&self) -> CliResult {
        use std::io::{self, Write};

        // Confirm unless --yes (for resetting all)
        if self.key.is_none() && !self.yes {
            print!("Reset all config to defaults? [Y/n]: ");
            let _ = io::stdout().flush();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).is_ok() {
                let input = input.trim().to_lowercase();
                if input == "n" || input == "no" {
                    println!("Cancelled.");
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }

        commands::config::config_reset(self.key.as_deref())?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigExplainCommand {
    /// Execute the config explain command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_explain(self.key.as_deref())?;
        Ok(ExitCode::SUCCESS)
    }
}

impl ConfigKeysCommand {
    /// Execute the config keys command.
    pub fn execute(&self) -> CliResult {
        commands::config::config_keys()?;
        Ok(ExitCode::SUCCESS)
    }
}

impl CompletionsCommand {
    /// Execute the completions command - generates shell completions.
    pub fn execute(&self) -> CliResult {
        commands::completions::completions(&self.shell)?;
        Ok(ExitCode::SUCCESS)
    }
}
