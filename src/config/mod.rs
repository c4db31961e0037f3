use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What a tree build does when two nodes end up with the same identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail the build with `CoreError::DuplicateIdentifier`.
    #[default]
    Reject,
    /// Keep the literal tree and list the collisions as diagnostics.
    Report,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix every node identifier is built under.
    pub root_prefix: String,
    pub duplicate_policy: DuplicatePolicy,
    /// Start with every directory of the file tree expanded.
    pub expand_all_directories: bool,
}

impl AppConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration")
    }

    /// Like [`AppConfig::from_json_str`], but falls back to the default
    /// configuration when the JSON cannot be parsed.
    pub fn from_json_str_or_default(json: &str) -> Self {
        match Self::from_json_str(json) {
            Ok(config) => {
                tracing::info!("Loaded configuration: {:?}", config);
                config
            }
            Err(e) => {
                tracing::warn!("{:#}. Falling back to default config.", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = AppConfig::from_json_str(r#"{ "duplicate_policy": "report" }"#).unwrap();
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Report);
        assert_eq!(config.root_prefix, "");
        assert!(!config.expand_all_directories);
    }

    #[test]
    fn test_invalid_policy_is_an_error() {
        assert!(AppConfig::from_json_str(r#"{ "duplicate_policy": "ignore" }"#).is_err());
    }

    #[test]
    #[traced_test]
    fn test_unparseable_config_falls_back_to_default() {
        let config = AppConfig::from_json_str_or_default("{ not json");
        assert_eq!(config, AppConfig::default());
        assert!(logs_contain("Falling back to default config"));
    }
}
