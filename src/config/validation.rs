//! ConfigField trait implementations for config sections.
//!
//! Every setter validates its input, and [`validate`] applies the same rules
//! to a whole config loaded from disk.

use std::str::FromStr;

use ratatui::style::Color;
use tracing_subscriber::EnvFilter;

use super::field::{parse_checked, ConfigField, FieldError};
use super::{hold_duration, ButtonConfig, ButtonShape, ClockConfig, LogConfig, LongPressConfig};
use crate::hold::MAX_DURATION;

const MAX_GRANULARITY_MS: u64 = MAX_DURATION.as_millis() as u64;

fn hold_secs(v: &f64) -> bool {
    hold_duration(*v).is_some()
}

fn tick_ms(v: &u64) -> bool {
    (1..=MAX_GRANULARITY_MS).contains(v)
}

fn non_negative_finite(v: &f64) -> bool {
    v.is_finite() && *v >= 0.0
}

fn unit_scale(v: &f64) -> bool {
    v.is_finite() && *v > 0.0 && *v <= 1.0
}

fn is_color(value: &str) -> bool {
    Color::from_str(value.trim()).is_ok()
}

fn is_filter(value: &str) -> bool {
    EnvFilter::try_new(value).is_ok()
}

fn shape_name(shape: ButtonShape) -> &'static str {
    match shape {
        ButtonShape::Capsule => "capsule",
        ButtonShape::Rectangle => "rectangle",
    }
}

fn invalid(key: &str, expected: &str) -> FieldError {
    FieldError::InvalidValue {
        key: key.into(),
        expected: expected.into(),
    }
}

impl ConfigField for ButtonConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "text" => Some(self.text.clone()),
            "duration_secs" => Some(self.duration_secs.to_string()),
            "tint_color" => Some(self.tint_color.clone()),
            "loading_tint_color" => Some(self.loading_tint_color.clone()),
            "holding_scale" => Some(self.holding_scale.to_string()),
            "shape" => Some(shape_name(self.shape).to_string()),
            "vertical_padding" => Some(self.vertical_padding.to_string()),
            "horizontal_padding" => Some(self.horizontal_padding.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "text" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, "non-empty label"));
                }
                self.text = value.to_string();
            }
            "duration_secs" => {
                let expected = "positive number of seconds, at most 3600";
                self.duration_secs = parse_checked(key, value, expected, hold_secs)?;
            }
            "tint_color" | "loading_tint_color" => {
                if !is_color(value) {
                    return Err(invalid(key, "colour name, index (0-255) or #rrggbb"));
                }
                let color = value.trim().to_string();
                if key == "tint_color" {
                    self.tint_color = color;
                } else {
                    self.loading_tint_color = color;
                }
            }
            "holding_scale" => {
                self.holding_scale =
                    parse_checked(key, value, "number greater than 0 and at most 1", unit_scale)?;
            }
            "shape" => {
                self.shape = match value.trim().to_lowercase().as_str() {
                    "capsule" => ButtonShape::Capsule,
                    "rectangle" => ButtonShape::Rectangle,
                    _ => return Err(invalid(key, "capsule or rectangle")),
                };
            }
            "vertical_padding" => {
                self.vertical_padding =
                    parse_checked(key, value, "non-negative number", non_negative_finite)?;
            }
            "horizontal_padding" => {
                self.horizontal_padding =
                    parse_checked(key, value, "non-negative number", non_negative_finite)?;
            }
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "text",
            "duration_secs",
            "tint_color",
            "loading_tint_color",
            "holding_scale",
            "shape",
            "vertical_padding",
            "horizontal_padding",
        ]
    }

    fn section_name() -> &'static str {
        "button"
    }
}

impl ConfigField for ClockConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "granularity_ms" => Some(self.granularity_ms.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "granularity_ms" => {
                self.granularity_ms =
                    parse_checked(key, value, "integer from 1 to 3600000", tick_ms)?;
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["granularity_ms"]
    }

    fn section_name() -> &'static str {
        "clock"
    }
}

impl ConfigField for LogConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.level.clone()),
            "file" => Some(self.file.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "level" => {
                if !is_filter(value) {
                    return Err(invalid(key, "log level or filter directive"));
                }
                self.level = value.to_string();
                Ok(())
            }
            "file" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, "file path"));
                }
                self.file = value.to_string();
                Ok(())
            }
            _ => Err(FieldError::UnknownKey(key.into())),
        }
    }

    fn field_names() -> &'static [&'static str] {
        &["level", "file"]
    }

    fn section_name() -> &'static str {
        "log"
    }
}

/// Check a whole config; the message names the first offending key.
pub(super) fn validate(config: &LongPressConfig) -> Result<(), String> {
    let button = &config.button;
    let checks = [
        (hold_secs(&button.duration_secs), "button.duration_secs must be in (0, 3600]"),
        (unit_scale(&button.holding_scale), "button.holding_scale must be in (0, 1]"),
        (is_color(&button.tint_color), "button.tint_color is not a colour"),
        (is_color(&button.loading_tint_color), "button.loading_tint_color is not a colour"),
        (non_negative_finite(&button.vertical_padding), "button.vertical_padding must be >= 0"),
        (non_negative_finite(&button.horizontal_padding), "button.horizontal_padding must be >= 0"),
        (tick_ms(&config.clock.granularity_ms), "clock.granularity_ms must be in [1, 3600000]"),
        (is_filter(&config.log.level), "log.level is not a valid filter"),
    ];

    match checks.iter().find(|(ok, _)| !ok) {
        Some((_, message)) => Err((*message).to_string()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_set_duration() {
        let mut button = ButtonConfig::default();
        button.set_field("duration_secs", "0.5").unwrap();
        assert_eq!(button.duration_secs, 0.5);
    }

    #[test]
    fn test_button_rejects_non_positive_duration() {
        let mut button = ButtonConfig::default();
        assert!(button.set_field("duration_secs", "0").is_err());
        assert!(button.set_field("duration_secs", "-2").is_err());
        assert!(button.set_field("duration_secs", "NaN").is_err());
        assert_eq!(button.duration_secs, 1.0);
    }

    #[test]
    fn test_button_rejects_duration_that_is_not_a_usable_hold() {
        let mut button = ButtonConfig::default();
        assert!(button.set_field("duration_secs", "1e20").is_err());
        assert!(button.set_field("duration_secs", "1e-10").is_err());
        assert!(button.set_field("duration_secs", "3601").is_err());
        button.set_field("duration_secs", "3600").unwrap();
        assert_eq!(button.duration(), MAX_DURATION);
    }

    #[test]
    fn test_validate_rejects_unusable_duration() {
        for secs in [1e20, 1e-10] {
            let mut config = LongPressConfig::default();
            config.button.duration_secs = secs;
            let message = validate(&config).unwrap_err();
            assert!(message.contains("duration_secs"), "{secs}");
        }
    }

    #[test]
    fn test_button_holding_scale_range() {
        let mut button = ButtonConfig::default();
        assert!(button.set_field("holding_scale", "1").is_ok());
        assert!(button.set_field("holding_scale", "0.5").is_ok());
        assert!(button.set_field("holding_scale", "1.2").is_err());
        assert!(button.set_field("holding_scale", "0").is_err());
        assert_eq!(button.holding_scale, 0.5);
    }

    #[test]
    fn test_button_colours() {
        let mut button = ButtonConfig::default();
        button.set_field("tint_color", "#1e1e2e").unwrap();
        button.set_field("loading_tint_color", "light green").unwrap();
        assert_eq!(button.tint_color, "#1e1e2e");
        assert_eq!(button.loading_tint_color, "light green");
        assert!(button.set_field("tint_color", "not-a-colour").is_err());
    }

    #[test]
    fn test_button_shape() {
        let mut button = ButtonConfig::default();
        button.set_field("shape", "Rectangle").unwrap();
        assert_eq!(button.shape, ButtonShape::Rectangle);
        assert_eq!(button.get_field("shape").unwrap(), "rectangle");
        assert!(button.set_field("shape", "circle").is_err());
    }

    #[test]
    fn test_button_empty_text_rejected() {
        let mut button = ButtonConfig::default();
        assert!(button.set_field("text", "   ").is_err());
    }

    #[test]
    fn test_clock_granularity() {
        let mut clock = ClockConfig::default();
        clock.set_field("granularity_ms", "16").unwrap();
        assert_eq!(clock.granularity_ms, 16);
        assert!(clock.set_field("granularity_ms", "0").is_err());
        assert!(clock.set_field("granularity_ms", "fast").is_err());
        assert!(clock.set_field("granularity_ms", "3600001").is_err());
        assert!(clock.set_field("granularity_ms", "3600000").is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut log = LogConfig::default();
        log.set_field("level", "longpress=debug").unwrap();
        assert_eq!(log.level, "longpress=debug");
        assert!(log.set_field("level", "longpress=loud").is_err());
    }

    #[test]
    fn test_unknown_keys() {
        let mut button = ButtonConfig::default();
        assert!(button.get_field("colour").is_none());
        assert!(matches!(
            button.set_field("colour", "red"),
            Err(FieldError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_field_names_round_trip() {
        let button = ButtonConfig::default();
        for name in ButtonConfig::field_names() {
            assert!(button.get_field(name).is_some(), "missing getter for {name}");
        }
        let clock = ClockConfig::default();
        for name in ClockConfig::field_names() {
            assert!(clock.get_field(name).is_some());
        }
        let log = LogConfig::default();
        for name in LogConfig::field_names() {
            assert!(log.get_field(name).is_some());
        }
    }

    #[test]
    fn test_section_names() {
        assert_eq!(ButtonConfig::section_name(), "button");
        assert_eq!(ClockConfig::section_name(), "clock");
        assert_eq!(LogConfig::section_name(), "log");
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let mut config = LongPressConfig::default();
        config.button.holding_scale = 3.0;
        let message = validate(&config).unwrap_err();
        assert!(message.contains("holding_scale"));
    }
}
