//! ConfigField trait for dynamic get/set access to config sections.
//!
//! This module provides a trait-based abstraction for accessing config
//! fields by name, enabling the `longpress config` CLI commands.

use std::str::FromStr;

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Trait for config sections that support dynamic get/set access.
pub trait ConfigField {
    /// Get a field value by name, returning serialised string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    ///
    /// Returns an error if the key is not recognised or the value is invalid.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// List all field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Get the section name for this config type.
    fn section_name() -> &'static str
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// # Examples
///
/// ```ignore
/// split_path("button.duration_secs") // Ok(("button", "duration_secs"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Parse `value` and accept it only if `valid` holds.
pub fn parse_checked<T: FromStr>(
    key: &str,
    value: &str,
    expected: &str,
    valid: impl Fn(&T) -> bool,
) -> Result<T, FieldError> {
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|v| valid(v))
        .ok_or_else(|| FieldError::InvalidValue {
            key: key.into(),
            expected: expected.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_valid() {
        let (section, field) = split_path("button.duration_secs").unwrap();
        assert_eq!(section, "button");
        assert_eq!(field, "duration_secs");
    }

    #[test]
    fn test_split_path_invalid() {
        let result = split_path("invalid");
        assert!(matches!(result.unwrap_err(), FieldError::InvalidPath(_)));
    }

    #[test]
    fn test_parse_checked_accepts_valid() {
        let v: f64 = parse_checked("k", " 2.5 ", "number", |v: &f64| *v > 0.0).unwrap();
        assert_eq!(v, 2.5);
    }

    #[test]
    fn test_parse_checked_rejects_out_of_range() {
        let result = parse_checked("k", "-1", "positive number", |v: &f64| *v > 0.0);
        assert!(matches!(result, Err(FieldError::InvalidValue { .. })));
    }

    #[test]
    fn test_parse_checked_rejects_garbage() {
        let result = parse_checked::<u64>("k", "ten", "integer", |_| true);
        assert!(result.is_err());
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError::UnknownKey("foo.bar".into());
        assert_eq!(err.to_string(), "Unknown config key: foo.bar");

        let err = FieldError::InvalidValue {
            key: "granularity_ms".into(),
            expected: "positive integer".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for granularity_ms: expected positive integer"
        );

        let err = FieldError::InvalidPath("invalid".into());
        assert_eq!(err.to_string(), "Invalid path format: invalid");
    }
}
