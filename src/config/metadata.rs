//! Config key metadata for documentation and help.
//!
//! This module provides descriptions, types, defaults, and examples
//! for all config keys, used by `longpress config explain`.

/// Metadata for a single config key.
#[derive(Debug, Clone)]
pub struct KeyMetadata {
    /// The full dot-notation key (e.g., "button.duration_secs").
    pub key: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Type description (e.g., "seconds", "colour").
    pub value_type: &'static str,
    /// Default value as string.
    pub default: &'static str,
    /// Example values.
    pub examples: &'static [&'static str],
}

/// All config key metadata.
pub static METADATA: &[KeyMetadata] = &[
    // button section
    KeyMetadata {
        key: "button.text",
        description: "Label drawn on the button.",
        value_type: "string",
        default: "Hold to Increase",
        examples: &["Hold to Delete", "Hold to Confirm"],
    },
    KeyMetadata {
        key: "button.duration_secs",
        description: "Seconds the button must be held before its action fires. Releasing \
                      or moving off the button earlier cancels the hold.",
        value_type: "seconds in (0, 3600]",
        default: "1",
        examples: &["0.5", "1.5", "3"],
    },
    KeyMetadata {
        key: "button.tint_color",
        description: "Background colour of the button.",
        value_type: "colour name | index | #rrggbb",
        default: "black",
        examples: &["black", "blue", "#1e1e2e"],
    },
    KeyMetadata {
        key: "button.loading_tint_color",
        description: "Colour of the progress fill that grows while the button is held.",
        value_type: "colour name | index | #rrggbb",
        default: "dark gray",
        examples: &["dark gray", "light green", "240"],
    },
    KeyMetadata {
        key: "button.holding_scale",
        description: "Scale applied to the button while it is held.",
        value_type: "number in (0, 1]",
        default: "0.95",
        examples: &["1", "0.9", "0.8"],
    },
    KeyMetadata {
        key: "button.shape",
        description: "Clip and contact shape. A capsule leaves its corner cells outside \
                      the button, both for drawing and for hit testing.",
        value_type: "capsule | rectangle",
        default: "capsule",
        examples: &["capsule", "rectangle"],
    },
    KeyMetadata {
        key: "button.vertical_padding",
        description: "Space above and below the label, in points (10 points per row).",
        value_type: "non-negative number",
        default: "10",
        examples: &["0", "10", "20"],
    },
    KeyMetadata {
        key: "button.horizontal_padding",
        description: "Space left and right of the label, in points (5 points per column).",
        value_type: "non-negative number",
        default: "20",
        examples: &["10", "20", "40"],
    },
    // clock section
    KeyMetadata {
        key: "clock.granularity_ms",
        description: "Tick interval of the progress clock in milliseconds. Each tick adds \
                      exactly this much to the held time.",
        value_type: "integer from 1 to 3600000",
        default: "10",
        examples: &["5", "10", "16"],
    },
    // log section
    KeyMetadata {
        key: "log.level",
        description: "Default log filter. The LONGPRESS_LOG environment variable \
                      overrides it.",
        value_type: "level or filter directive",
        default: "info",
        examples: &["warn", "debug", "longpress::hold=trace"],
    },
    KeyMetadata {
        key: "log.file",
        description: "File the terminal UI writes its log to.",
        value_type: "file path",
        default: ".longpress/longpress.log",
        examples: &["/tmp/longpress.log", ".longpress/debug.log"],
    },
];

/// Get metadata for a specific key.
pub fn get_metadata(key: &str) -> Option<&'static KeyMetadata> {
    METADATA.iter().find(|m| m.key == key)
}

/// Get all keys in the metadata table.
pub fn all_keys() -> impl Iterator<Item = &'static str> {
    METADATA.iter().map(|m| m.key)
}

/// Search for keys matching a query (key or description contains it).
pub fn search_keys(query: &str) -> Vec<&'static KeyMetadata> {
    let query_lower = query.to_lowercase();
    METADATA
        .iter()
        .filter(|m| {
            m.key.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Get all keys for a specific section.
pub fn keys_for_section(section: &str) -> Vec<&'static KeyMetadata> {
    let prefix = format!("{section}.");
    METADATA
        .iter()
        .filter(|m| m.key.starts_with(&prefix))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LongPressConfig;

    #[test]
    fn test_get_metadata_existing() {
        let meta = get_metadata("button.duration_secs").unwrap();
        assert_eq!(meta.default, "1");
        assert!(meta.description.contains("held"));
    }

    #[test]
    fn test_get_metadata_missing() {
        assert!(get_metadata("nonexistent.key").is_none());
    }

    #[test]
    fn test_search_keys_by_description() {
        let results = search_keys("progress");
        assert!(results.iter().any(|m| m.key == "button.loading_tint_color"));
    }

    #[test]
    fn test_keys_for_section() {
        assert_eq!(keys_for_section("button").len(), 8);
        assert_eq!(keys_for_section("clock").len(), 1);
        assert_eq!(keys_for_section("log").len(), 2);
    }

    #[test]
    fn test_metadata_covers_every_config_key() {
        let documented: Vec<_> = all_keys().collect();
        for key in LongPressConfig::all_keys() {
            assert!(documented.contains(&key.as_str()), "{key} is undocumented");
        }
    }

    #[test]
    fn test_metadata_defaults_match_config() {
        let config = LongPressConfig::default();
        for meta in METADATA {
            assert_eq!(
                config.get_by_path(meta.key).unwrap(),
                meta.default,
                "default mismatch for {}",
                meta.key
            );
        }
    }

    #[test]
    fn test_examples_are_accepted() {
        for meta in METADATA {
            for example in meta.examples {
                let mut config = LongPressConfig::default();
                assert!(
                    config.set_by_path(meta.key, example).is_ok(),
                    "{} rejects its example {example}",
                    meta.key
                );
            }
        }
    }
}
