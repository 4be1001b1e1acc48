//! Configuration types for the Opto facade

use crate::error::{Result, SdkError};
use opto_core::declaration::normalize_key;
use opto_core::{GroupConfig, Params, Value};
use serde::{Deserialize, Serialize};

/// Facade configuration
///
/// ```yaml
/// root_key: variables
/// unique_names: true
/// defaults:
///   min: 1
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Group construction settings (`defaults`, `unique_names`)
    #[serde(flatten)]
    pub group: GroupConfig,

    /// Top-level key `Opto::load` reads declarations from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_key: Option<String>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SdkError::ConfigError(e.to_string()))
    }

    /// Set the group defaults
    pub fn with_defaults(mut self, defaults: Params) -> Self {
        self.group.defaults = defaults;
        self
    }

    /// Add one group default
    pub fn with_default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.group.defaults.insert(normalize_key(key), value.into());
        self
    }

    /// Reject duplicate option names
    pub fn with_unique_names(mut self, unique: bool) -> Self {
        self.group.unique_names = unique;
        self
    }

    /// Set the top-level key used when loading documents
    pub fn with_root_key(mut self, key: impl Into<String>) -> Self {
        self.root_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_setters() {
        let config = EngineConfig::new()
            .with_default(":max", 10)
            .with_unique_names(true)
            .with_root_key("variables");

        assert_eq!(config.group.defaults.get("max"), Some(&Value::Number(10.0)));
        assert!(config.group.unique_names);
        assert_eq!(config.root_key.as_deref(), Some("variables"));
    }

    #[test]
    fn test_from_yaml() {
        let config = EngineConfig::from_yaml_str(
            "root_key: options\nunique_names: true\ndefaults:\n  min: 1\n",
        )
        .unwrap();

        assert_eq!(config.root_key.as_deref(), Some("options"));
        assert!(config.group.unique_names);
        assert_eq!(config.group.defaults.get("min"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_from_yaml_defaults() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = EngineConfig::from_yaml_str("unique_names: [").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }
}
