//! Runtime value types for option values and declarations
//!
//! The `Value` enum represents raw input, sanitized output and declaration
//! parameters alike. It mirrors JSON, with an insertion-ordered object so
//! declarations serialize back in the order they were written.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null value, used for "absent"
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 for simplicity, handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (insertion-ordered key-value map)
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// String form used by the string predicates (`start_with`, `contain`, ...).
    ///
    /// Null renders as the empty string and integral numbers render without a
    /// fractional part, so `18.0` becomes `"18"`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(_) | Value::Object(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    /// Order two values when they are of comparable kinds.
    ///
    /// Numbers compare with numbers and strings with strings; any other
    /// pairing (including null on either side) is incomparable.
    pub fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

fn is_integral(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15
}

fn format_number(n: f64) -> String {
    if is_integral(n) {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

// Integral numbers are written as integers so `to_h` output reads `11`, not `11.0`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) if is_integral(*n) => serializer.serialize_i64(*n as i64),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Object(map) => map.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_from_json() {
        let val = Value::from(json!({"name": "count", "min": 1, "tags": ["a", true]}));

        let map = val.as_object().unwrap();
        assert_eq!(map.get("name"), Some(&Value::String("count".to_string())));
        assert_eq!(map.get("min"), Some(&Value::Number(1.0)));
        assert_eq!(
            map.get("tags"),
            Some(&Value::Array(vec![Value::from("a"), Value::Bool(true)]))
        );
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::Null.to_display_string(), "");
        assert_eq!(Value::Number(18.0).to_display_string(), "18");
        assert_eq!(Value::Number(-2.5).to_display_string(), "-2.5");
        assert_eq!(Value::Bool(false).to_display_string(), "false");
        assert_eq!(Value::from("abc").to_display_string(), "abc");
        assert_eq!(
            Value::Array(vec![Value::Number(1.0), Value::from("x")]).to_display_string(),
            r#"[1,"x"]"#
        );
    }

    #[test]
    fn test_partial_cmp_value() {
        assert_eq!(
            Value::Number(1.0).partial_cmp_value(&Value::Number(2.0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("b").partial_cmp_value(&Value::from("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Null.partial_cmp_value(&Value::Number(1.0)), None);
        assert_eq!(Value::from("1").partial_cmp_value(&Value::Number(1.0)), None);
    }

    #[test]
    fn test_serialize_integral_numbers() {
        let mut map = IndexMap::new();
        map.insert("count".to_string(), Value::Number(11.0));
        map.insert("ratio".to_string(), Value::Number(0.5));
        map.insert("missing".to_string(), Value::Null);

        let json = serde_json::to_string(&Value::Object(map)).unwrap();
        assert_eq!(json, r#"{"count":11,"ratio":0.5,"missing":null}"#);
    }

    #[test]
    fn test_deserialize_untagged() {
        let val: Value = serde_json::from_str(r#"{"a": [1, "two", null]}"#).unwrap();
        let items = val.as_object().unwrap().get("a").unwrap().as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[2].is_null());
    }
}
