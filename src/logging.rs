//! Tracing subscriber setup.
//!
//! `LONGPRESS_LOG` takes precedence over `log.level`. The terminal UI logs
//! to a file because stderr shares the alternate screen.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "LONGPRESS_LOG";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, for headless commands.
    Stderr,
    /// The configured log file, for the terminal UI.
    File,
}

/// Build the filter from the environment, falling back to the config.
pub fn filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Once a subscriber is installed, later calls leave it in place and return
/// `Ok`, so tests and repeated commands can call it freely.
pub fn init(config: &LogConfig, target: LogTarget) -> io::Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }
    let filter = filter(config);
    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
        LogTarget::File => {
            let file = open_log_file(Path::new(&config.file))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    match result {
        Ok(()) => Ok(()),
        // Lost a race with another thread installing its own.
        Err(_) if tracing::dispatcher::has_been_set() => Ok(()),
        Err(e) => Err(io::Error::other(e)),
    }
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_log_file_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("longpress.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_filter_falls_back_to_config_level() {
        let config = LogConfig {
            level: "longpress=debug".to_string(),
            ..LogConfig::default()
        };
        if std::env::var(LOG_ENV).is_err() {
            assert_eq!(filter(&config).to_string(), "longpress=debug");
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let temp = TempDir::new().unwrap();
        let config = LogConfig {
            file: temp.path().join("a.log").to_string_lossy().into_owned(),
            ..LogConfig::default()
        };
        init(&config, LogTarget::File).unwrap();
        assert!(tracing::dispatcher::has_been_set());
        init(&config, LogTarget::Stderr).unwrap();
    }
}
