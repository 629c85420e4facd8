//! Configuration models for .longpress/config.json.
//!
//! The file is optional: a missing file yields defaults, and a partial file
//! fills absent keys with their defaults.

pub mod field;
pub mod metadata;
mod validation;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::hold::MAX_DURATION;

/// Default config file path.
pub const CONFIG_FILE: &str = ".longpress/config.json";
/// Default log file path.
pub const LOG_FILE: &str = ".longpress/longpress.log";

/// Clip and contact geometry of the button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    /// Pill shape; the corner cells are outside the button.
    #[default]
    Capsule,
    /// Every cell of the button's area.
    Rectangle,
}

/// Construction-time settings of the hold button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Label shown on the button.
    #[serde(default = "default_text")]
    pub text: String,
    /// Seconds of contact needed to commit.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// Base fill colour.
    #[serde(default = "default_tint_color")]
    pub tint_color: String,
    /// Progress fill colour.
    #[serde(default = "default_loading_tint_color")]
    pub loading_tint_color: String,
    /// Scale applied while holding.
    #[serde(default = "default_holding_scale")]
    pub holding_scale: f64,
    /// Clip and contact geometry.
    #[serde(default)]
    pub shape: ButtonShape,
    /// Vertical padding in points.
    #[serde(default = "default_vertical_padding")]
    pub vertical_padding: f64,
    /// Horizontal padding in points.
    #[serde(default = "default_horizontal_padding")]
    pub horizontal_padding: f64,
}

fn default_text() -> String {
    "Hold to Increase".to_string()
}

fn default_duration_secs() -> f64 {
    1.0
}

fn default_tint_color() -> String {
    "black".to_string()
}

fn default_loading_tint_color() -> String {
    "dark gray".to_string()
}

fn default_holding_scale() -> f64 {
    0.95
}

fn default_vertical_padding() -> f64 {
    10.0
}

fn default_horizontal_padding() -> f64 {
    20.0
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            text: default_text(),
            duration_secs: default_duration_secs(),
            tint_color: default_tint_color(),
            loading_tint_color: default_loading_tint_color(),
            holding_scale: default_holding_scale(),
            shape: ButtonShape::default(),
            vertical_padding: default_vertical_padding(),
            horizontal_padding: default_horizontal_padding(),
        }
    }
}

/// `secs` as a hold threshold, if it is non-zero and at most [`MAX_DURATION`].
pub fn hold_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| !d.is_zero() && *d <= MAX_DURATION)
}

impl ButtonConfig {
    /// Hold threshold as a `Duration`.
    ///
    /// Validated values always convert; anything else falls back to the
    /// one second default.
    pub fn duration(&self) -> Duration {
        hold_duration(self.duration_secs).unwrap_or(Duration::from_secs(1))
    }
}

/// Settings of the progress clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "default_granularity_ms")]
    pub granularity_ms: u64,
}

fn default_granularity_ms() -> u64 {
    10
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            granularity_ms: default_granularity_ms(),
        }
    }
}

impl ClockConfig {
    /// Tick interval as a `Duration`.
    pub fn granularity(&self) -> Duration {
        Duration::from_millis(self.granularity_ms)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive, overridden by `LONGPRESS_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// File the terminal UI logs to.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    LOG_FILE.to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration for longpress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongPressConfig {
    /// Button settings.
    #[serde(default)]
    pub button: ButtonConfig,
    /// Clock settings.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the config file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    /// The file parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl LongPressConfig {
    /// Load configuration from a file, or return defaults if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to config file. Defaults to `.longpress/config.json` if None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: LongPressConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_file);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate(self).map_err(ConfigError::Invalid)
    }

    /// Path used by [`load`](Self::load) and [`save`](Self::save) when none is given.
    pub fn config_file() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Get a config value by dot-notation path (e.g., "button.duration_secs").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "button" => self.button.get_field(key),
            "clock" => self.clock.get_field(key),
            "log" => self.log.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        match section {
            "button" => self.button.set_field(key, value),
            "clock" => self.clock.set_field(key, value),
            "log" => self.log.set_field(key, value),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["button", "clock", "log"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "button" => Some(ButtonConfig::field_names()),
            "clock" => Some(ClockConfig::field_names()),
            "log" => Some(LogConfig::field_names()),
            _ => None,
        }
    }

    /// List all valid config keys as dot-notation paths.
    pub fn all_keys() -> Vec<String> {
        let mut keys = Vec::new();
        for section in Self::section_names() {
            if let Some(fields) = Self::fields_for_section(section) {
                for field in fields {
                    keys.push(format!("{section}.{field}"));
                }
            }
        }
        keys
    }

    /// Reset a section to its default values.
    pub fn reset_section(&mut self, section: &str) -> Result<(), FieldError> {
        match section {
            "button" => self.button = ButtonConfig::default(),
            "clock" => self.clock = ClockConfig::default(),
            "log" => self.log = LogConfig::default(),
            _ => return Err(FieldError::UnknownKey(section.into())),
        }
        Ok(())
    }

    /// Reset a specific field to its default value.
    pub fn reset_field(&mut self, path: &str) -> Result<(), FieldError> {
        let default = Self::default().get_by_path(path)?;
        self.set_by_path(path, &default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_button_config_defaults() {
        let config = ButtonConfig::default();
        assert_eq!(config.text, "Hold to Increase");
        assert_eq!(config.duration_secs, 1.0);
        assert_eq!(config.duration(), Duration::from_secs(1));
        assert_eq!(config.holding_scale, 0.95);
        assert_eq!(config.shape, ButtonShape::Capsule);
        assert_eq!(config.vertical_padding, 10.0);
        assert_eq!(config.horizontal_padding, 20.0);
    }

    #[test]
    fn test_button_duration_never_zero() {
        for secs in [-1.0, 1e-10, 1e20, f64::NAN] {
            let config = ButtonConfig {
                duration_secs: secs,
                ..ButtonConfig::default()
            };
            assert_eq!(config.duration(), Duration::from_secs(1), "{secs}");
        }
    }

    #[test]
    fn test_hold_duration_bounds() {
        assert_eq!(hold_duration(0.25), Some(Duration::from_millis(250)));
        assert_eq!(hold_duration(3600.0), Some(MAX_DURATION));
        assert_eq!(hold_duration(3600.5), None);
        assert_eq!(hold_duration(1e-10), None);
        assert_eq!(hold_duration(1e20), None);
        assert_eq!(hold_duration(0.0), None);
    }

    #[test]
    fn test_clock_config_defaults() {
        let config = ClockConfig::default();
        assert_eq!(config.granularity_ms, 10);
        assert_eq!(config.granularity(), Duration::from_millis(10));
    }

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file, LOG_FILE);
    }

    #[test]
    fn test_shape_serialisation() {
        let json = serde_json::to_string(&ButtonShape::Rectangle).unwrap();
        assert_eq!(json, r#""rectangle""#);
        let parsed: ButtonShape = serde_json::from_str(r#""capsule""#).unwrap();
        assert_eq!(parsed, ButtonShape::Capsule);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(LongPressConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.json");
        let config = LongPressConfig::load(Some(&path)).unwrap();
        assert_eq!(config, LongPressConfig::default());
    }

    #[test]
    fn test_config_save_creates_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".longpress").join("config.json");
        LongPressConfig::default().save(Some(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_config_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let mut config = LongPressConfig::default();
        config.button.text = "Hold to Delete".to_string();
        config.button.duration_secs = 2.5;
        config.button.shape = ButtonShape::Rectangle;
        config.clock.granularity_ms = 5;
        config.save(Some(&path)).unwrap();

        let loaded = LongPressConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "button": { "duration_secs": 3 } }"#).unwrap();

        let config = LongPressConfig::load(Some(&path)).unwrap();
        assert_eq!(config.button.duration_secs, 3.0);
        assert_eq!(config.button.text, "Hold to Increase");
        assert_eq!(config.clock, ClockConfig::default());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_config_load_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "clock": { "granularity_ms": 0 } }"#).unwrap();

        let result = LongPressConfig::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_load_rejects_overflowing_duration() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "button": { "duration_secs": 1e20 } }"#).unwrap();

        let result = LongPressConfig::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_config_load_rejects_bad_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let result = LongPressConfig::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_get_and_set_by_path() {
        let mut config = LongPressConfig::default();
        assert_eq!(config.get_by_path("button.duration_secs").unwrap(), "1");

        config.set_by_path("button.duration_secs", "2.5").unwrap();
        assert_eq!(config.get_by_path("button.duration_secs").unwrap(), "2.5");

        config.set_by_path("clock.granularity_ms", "20").unwrap();
        assert_eq!(config.clock.granularity_ms, 20);
    }

    #[test]
    fn test_config_get_unknown_section() {
        let config = LongPressConfig::default();
        let result = config.get_by_path("limits.max_iterations");
        assert!(matches!(result, Err(FieldError::UnknownKey(_))));
    }

    #[test]
    fn test_config_reset_section() {
        let mut config = LongPressConfig::default();
        config.set_by_path("button.text", "Other").unwrap();
        config.reset_section("button").unwrap();
        assert_eq!(config.button, ButtonConfig::default());
        assert!(config.reset_section("nope").is_err());
    }

    #[test]
    fn test_config_reset_field() {
        let mut config = LongPressConfig::default();
        config.set_by_path("button.holding_scale", "0.5").unwrap();
        config.reset_field("button.holding_scale").unwrap();
        assert_eq!(config.button.holding_scale, 0.95);
    }

    #[test]
    fn test_all_keys_match_sections() {
        let keys = LongPressConfig::all_keys();
        assert!(keys.contains(&"button.duration_secs".to_string()));
        assert!(keys.contains(&"clock.granularity_ms".to_string()));
        assert!(keys.contains(&"log.level".to_string()));
        assert_eq!(keys.len(), 11);
    }

    #[test]
    fn test_default_config_file() {
        assert_eq!(
            LongPressConfig::config_file(),
            PathBuf::from(".longpress/config.json")
        );
    }
}
