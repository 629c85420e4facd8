//! longpress - a button you have to hold down.
//!
//! This is the main entry point for the longpress CLI tool.

use clap::Parser;
use longpress::cli::{handle_result, Cli, CliResult, Commands, ConfigCommands, ExitCode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result: CliResult = match cli.command {
        None => {
            // No subcommand provided - show quick start
            println!("longpress - a button you have to hold down.");
            println!();
            println!("Run 'longpress --help' for available commands.");
            println!();
            println!("Quick start:");
            println!("  longpress run                  # Hold the button to increase the counter");
            println!("  longpress simulate             # Headless run of one full hold");
            println!("  longpress simulate --hold 0.3  # Let go early");
            println!("  longpress config explain       # Documented settings");
            Ok(ExitCode::SUCCESS)
        }
        Some(cmd) => match cmd {
            Commands::Run(c) => c.execute(),
            Commands::Simulate(c) => c.execute(),
            Commands::Config(subcmd) => match subcmd {
                ConfigCommands::Show(c) => c.execute(),
                ConfigCommands::Get(c) => c.execute(),
                ConfigCommands::Set(c) => c.execute(),
                ConfigCommands::Reset(c) => c.execute(),
                ConfigCommands::Explain(c) => c.execute(),
                ConfigCommands::Keys(c) => c.execute(),
            },
            Commands::Completions(c) => c.execute(),
        },
    };

    handle_result(result)
}
