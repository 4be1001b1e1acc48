//! YAML Loader
//!
//! Provides utilities for reading YAML documents into option declaration
//! values.

use crate::error::{LoadError, Result};
use opto_core::declaration::{normalize_key, normalize_value};
use opto_core::Value;
use serde_yaml::Value as YamlValue;
use std::io::Read;

/// YAML loader utilities
pub struct YamlLoader;

impl YamlLoader {
    /// Parse YAML text into a value, normalizing symbol-style keys
    pub fn parse(yaml_str: &str) -> Result<Value> {
        let yaml: YamlValue = serde_yaml::from_str(yaml_str)?;
        Ok(normalize_value(&yaml_to_value(yaml)))
    }

    /// Parse YAML text and select `key` from the top-level mapping if given
    pub fn load_str(yaml_str: &str, key: Option<&str>) -> Result<Value> {
        Self::select(Self::parse(yaml_str)?, key)
    }

    /// Read a YAML document from a byte source
    pub fn load_reader<R: Read>(reader: R, key: Option<&str>) -> Result<Value> {
        let yaml: YamlValue = serde_yaml::from_reader(reader)?;
        Self::select(normalize_value(&yaml_to_value(yaml)), key)
    }

    /// Pick a top-level entry, or return the whole document without a key
    pub fn select(root: Value, key: Option<&str>) -> Result<Value> {
        let Some(key) = key else {
            return Ok(root);
        };
        let key = normalize_key(key);
        log::debug!("selecting top-level key '{}'", key);

        match root {
            Value::Object(mut map) => map
                .shift_remove(&key)
                .ok_or(LoadError::MissingKey(key)),
            other => Err(LoadError::NotAMapping {
                key,
                actual: other.type_name().to_string(),
            }),
        }
    }
}

/// Convert a YAML value. Non-string mapping keys are stringified and tags
/// are dropped.
pub fn yaml_to_value(yaml: YamlValue) -> Value {
    match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_value).collect()),
        YamlValue::Mapping(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_value(v)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => String::new(),
        other => yaml_to_value(other).to_display_string(),
    }
}
