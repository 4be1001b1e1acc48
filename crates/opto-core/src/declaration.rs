//! Option declarations
//!
//! A declaration is the mapping a caller writes for one option:
//! `{ name, type, <type parameters...>, if?, unless?, output?, value?, default? }`.
//! Keys may be written in symbol style (`:min`); they are normalized to plain
//! strings when the declaration is read.

use crate::error::{OptoError, Result};
use crate::types::{Params, Value};

pub const NAME_KEY: &str = "name";
pub const TYPE_KEY: &str = "type";
pub const IF_KEY: &str = "if";
pub const UNLESS_KEY: &str = "unless";
pub const OUTPUT_KEY: &str = "output";
pub const VALUE_KEY: &str = "value";
pub const DEFAULT_KEY: &str = "default";
pub const GROUP_KEY: &str = "group";

/// Canonical form of a declaration key: symbol-style `:key` becomes `key`.
pub fn normalize_key(key: &str) -> String {
    key.strip_prefix(':').unwrap_or(key).to_string()
}

/// Normalize object keys recursively
pub fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (normalize_key(k), normalize_value(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(normalize_value).collect()),
        other => other.clone(),
    }
}

/// Snake-case a type name, so `Integer`, `integer` and `:integer` all
/// resolve to `integer` and `IpAddress` to `ip_address`.
pub fn snake_case(name: &str) -> String {
    let name = normalize_key(name.trim());
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.map(|n| n.is_lowercase()).unwrap_or(false),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else if c == '-' || c.is_whitespace() || c == ':' {
            out.push('_');
        } else {
            out.push(c);
        }
    }

    let mut collapsed = String::with_capacity(out.len());
    for c in out.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

/// A validated, normalized declaration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Declaration {
    pub name: String,
    pub type_name: String,
    /// Type parameters exactly as declared (normalized keys)
    pub params: Params,
    pub if_conditions: Value,
    pub unless_conditions: Value,
    pub output: Value,
    pub value: Value,
    pub default: Value,
}

impl Declaration {
    /// Read a declaration from a mapping value
    pub fn parse(value: &Value) -> Result<Self> {
        match normalize_value(value) {
            Value::Object(map) => Self::from_params(map),
            other => Err(OptoError::InvalidDeclaration(format!(
                "an option declaration must be a mapping, got {}",
                other.type_name()
            ))),
        }
    }

    /// Read a mapping-form entry: the name comes from the key
    pub fn parse_named(name: &str, value: &Value) -> Result<Self> {
        let mut map = match normalize_value(value) {
            Value::Object(map) => map,
            Value::Null => Params::new(),
            other => {
                return Err(OptoError::InvalidDeclaration(format!(
                    "declaration for '{}' must be a mapping, got {}",
                    name,
                    other.type_name()
                )))
            }
        };
        if map.contains_key(NAME_KEY) {
            return Err(OptoError::InvalidDeclaration(format!(
                "declaration for '{}' must not supply '{}'",
                name, NAME_KEY
            )));
        }
        map.shift_insert(0, NAME_KEY.to_string(), Value::String(normalize_key(name)));
        Self::from_params(map)
    }

    fn from_params(mut map: Params) -> Result<Self> {
        if map.contains_key(GROUP_KEY) {
            return Err(OptoError::InvalidDeclaration(format!(
                "'{}' is reserved and cannot be declared",
                GROUP_KEY
            )));
        }

        let name = match map.shift_remove(NAME_KEY) {
            Some(Value::String(name)) if !name.is_empty() => name,
            Some(Value::String(_)) => {
                return Err(OptoError::InvalidDeclaration(
                    "option name must not be empty".to_string(),
                ))
            }
            Some(Value::Number(n)) => Value::Number(n).to_display_string(),
            Some(other) => {
                return Err(OptoError::InvalidDeclaration(format!(
                    "option name must be a string, got {}",
                    other.type_name()
                )))
            }
            None => {
                return Err(OptoError::InvalidDeclaration(
                    "option declaration is missing a name".to_string(),
                ))
            }
        };

        let type_name = match map.shift_remove(TYPE_KEY) {
            Some(Value::String(type_name)) => snake_case(&type_name),
            Some(other) => {
                return Err(OptoError::InvalidDeclaration(format!(
                    "type of '{}' must be a string, got {}",
                    name,
                    other.type_name()
                )))
            }
            None => {
                return Err(OptoError::InvalidDeclaration(format!(
                    "option '{}' is missing a type",
                    name
                )))
            }
        };

        let mut take = |key: &str| map.shift_remove(key).unwrap_or(Value::Null);
        let if_conditions = take(IF_KEY);
        let unless_conditions = take(UNLESS_KEY);
        let output = take(OUTPUT_KEY);
        let value = take(VALUE_KEY);
        let default = take(DEFAULT_KEY);

        Ok(Self {
            name,
            type_name,
            params: map,
            if_conditions,
            unless_conditions,
            output,
            value,
            default,
        })
    }
}
