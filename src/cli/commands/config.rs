//! Config command implementations.
//!
//! This module implements the `longpress config` subcommands for managing
//! configuration without editing JSON directly.

use crate::config::{
    metadata::{self, KeyMetadata},
    FieldError, LongPressConfig,
};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// A key or value was rejected.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The config file could not be loaded or saved.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// The named section does not exist.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show all config values in a human-readable format.
pub fn config_show(section_filter: Option<&str>) -> ConfigCommandResult {
    let config = LongPressConfig::load(None)?;

    let sections: Vec<&str> = match section_filter {
        Some(filter) if LongPressConfig::fields_for_section(filter).is_some() => vec![filter],
        Some(filter) => return Err(ConfigCommandError::UnknownSection(filter.into())),
        None => LongPressConfig::section_names().to_vec(),
    };

    println!("\x1b[1m=== longpress config ===\x1b[0m");
    println!();

    for section in sections {
        println!("\x1b[36m{section}\x1b[0m");
        if let Some(fields) = LongPressConfig::fields_for_section(section) {
            for field in fields {
                let path = format!("{section}.{field}");
                let value = config.get_by_path(&path).unwrap_or_else(|_| "?".into());
                println!("  {:<24} {}", field, value);
            }
        }
        println!();
    }

    Ok(())
}

/// Get a specific config value.
pub fn config_get(key: &str) -> ConfigCommandResult {
    let config = LongPressConfig::load(None)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value.
pub fn config_set(key: &str, value: &str) -> ConfigCommandResult {
    let mut config = LongPressConfig::load(None)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.save(None)?;

    // Show what changed
    let new_value = config.get_by_path(key)?;
    match old_value {
        Some(old) if old != new_value => {
            println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}");
        }
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }

    Ok(())
}

/// Reset a key, a section, or the whole config to defaults.
pub fn config_reset(key: Option<&str>) -> ConfigCommandResult {
    let mut config = LongPressConfig::load(None)?;

    match key {
        Some(k) if LongPressConfig::fields_for_section(k).is_some() => {
            config.reset_section(k)?;
            println!("\x1b[32m✓\x1b[0m Reset section '{k}' to defaults");
        }
        Some(k) if k.contains('.') => {
            config.reset_field(k)?;
            let new_value = config.get_by_path(k)?;
            println!("\x1b[32m✓\x1b[0m Reset {k} to default: {new_value}");
        }
        Some(k) => return Err(ConfigCommandError::UnknownSection(k.into())),
        None => {
            config = LongPressConfig::default();
            println!("\x1b[32m✓\x1b[0m Reset all config to defaults");
        }
    }

    config.save(None)?;
    Ok(())
}

/// Show documentation for config keys.
pub fn config_explain(key: Option<&str>) -> ConfigCommandResult {
    match key {
        Some(k) => explain_key(k),
        None => explain_all(),
    }
}

fn explain_key(key: &str) -> ConfigCommandResult {
    if let Some(meta) = metadata::get_metadata(key) {
        print_key_help(meta);
        return Ok(());
    }

    if LongPressConfig::fields_for_section(key).is_some() {
        println!("\x1b[1m{key}\x1b[0m section");
        println!();
        let prefix = format!("{key}.");
        for meta in metadata::keys_for_section(key) {
            let field = meta.key.strip_prefix(&prefix).unwrap_or(meta.key);
            println!("  \x1b[36m{field}\x1b[0m");
            println!("    {}", first_sentence(meta.description));
            println!();
        }
        return Ok(());
    }

    let matches = metadata::search_keys(key);
    if matches.is_empty() {
        eprintln!("\x1b[31mUnknown key:\x1b[0m {key}");
        eprintln!();
        suggest_similar_keys(key);
        return Err(FieldError::UnknownKey(key.into()).into());
    }

    println!("\x1b[33mDid you mean:\x1b[0m");
    for meta in matches.iter().take(5) {
        println!("  {}", meta.key);
    }
    Ok(())
}

fn explain_all() -> ConfigCommandResult {
    println!("\x1b[1m=== longpress config keys ===\x1b[0m");
    println!();
    println!("Use \x1b[36mlongpress config explain <key>\x1b[0m for details.");
    println!();

    for &section in LongPressConfig::section_names() {
        println!("\x1b[1m{section}\x1b[0m");
        for meta in metadata::keys_for_section(section) {
            let field = meta.key.strip_prefix(section).unwrap_or(meta.key);
            println!("  \x1b[36m{}\x1b[0m", field.trim_start_matches('.'));
            println!("    {}", first_sentence(meta.description));
        }
        println!();
    }

    Ok(())
}

fn first_sentence(description: &str) -> &str {
    description.split(". ").next().unwrap_or(description)
}

fn print_key_help(meta: &KeyMetadata) {
    let config = LongPressConfig::load(None).ok();
    let current = config.as_ref().and_then(|c| c.get_by_path(meta.key).ok());

    println!("\x1b[1m{}\x1b[0m", meta.key);
    println!();
    println!("  {}", meta.description);
    println!();
    println!("  \x1b[2mType:\x1b[0m     {}", meta.value_type);
    println!("  \x1b[2mDefault:\x1b[0m  {}", meta.default);
    match current {
        Some(curr) if curr == meta.default => {
            println!("  \x1b[2mCurrent:\x1b[0m  {curr} \x1b[2m(default)\x1b[0m");
        }
        Some(curr) => println!("  \x1b[2mCurrent:\x1b[0m  \x1b[33m{curr}\x1b[0m"),
        None => {}
    }
    println!();
    println!("  \x1b[2mExamples:\x1b[0m");
    for example in meta.examples {
        if example.contains(' ') {
            println!("    longpress config set {} \"{}\"", meta.key, example);
        } else {
            println!("    longpress config set {} {}", meta.key, example);
        }
    }
}

fn similar_keys(key: &str) -> Vec<&'static str> {
    let parts: Vec<&str> = key.split('.').filter(|p| !p.is_empty()).collect();
    metadata::all_keys()
        .filter(|k| k.split('.').any(|kp| parts.iter().any(|p| kp.contains(p))))
        .take(5)
        .collect()
}

fn suggest_similar_keys(key: &str) {
    let suggestions = similar_keys(key);
    if suggestions.is_empty() {
        eprintln!("Run \x1b[36mlongpress config explain\x1b[0m to see all available keys.");
        return;
    }
    eprintln!("\x1b[33mSimilar keys:\x1b[0m");
    for s in suggestions {
        eprintln!("  {s}");
    }
}

/// List all valid config keys.
pub fn config_keys() -> ConfigCommandResult {
    for key in LongPressConfig::all_keys() {
        println!("{key}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sentence() {
        assert_eq!(
            first_sentence("Seconds the button must be held. Releasing cancels."),
            "Seconds the button must be held"
        );
        assert_eq!(first_sentence("Label drawn on the button."), "Label drawn on the button.");
    }

    #[test]
    fn test_similar_keys_by_field_fragment() {
        let keys = similar_keys("padding");
        assert!(keys.contains(&"button.vertical_padding"));
        assert!(keys.contains(&"button.horizontal_padding"));
    }

    #[test]
    fn test_similar_keys_none() {
        assert!(similar_keys("zzz.qqq").is_empty());
    }

    #[test]
    fn test_command_error_display() {
        let err = ConfigCommandError::UnknownSection("limits".into());
        assert_eq!(err.to_string(), "Unknown section: limits");

        let err: ConfigCommandError = FieldError::UnknownKey("button.colour".into()).into();
        assert_eq!(err.to_string(), "Unknown config key: button.colour");
    }
}
