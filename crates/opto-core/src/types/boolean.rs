//! A flag.
//!
//! Also home of the truthiness rules shared by `Opt::is_true` and bare name
//! references in conditions.

use super::definition::{Params, TypeDefinition};
use super::value::Value;

pub const NAME: &str = "boolean";

const FALSY: &[&str] = &["false", "no", "off", "0", "nil", "null", "disabled"];

pub fn definition() -> TypeDefinition {
    TypeDefinition::new(NAME).with_sanitizer(sanitize)
}

fn sanitize(value: &Value, _options: &Params) -> Value {
    Value::Bool(truthy(value))
}

/// Boolean interpretation of a value
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0,
        Value::String(s) => {
            let s = s.trim();
            !s.is_empty() && !FALSY.iter().any(|f| s.eq_ignore_ascii_case(f))
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy() {
        assert!(truthy(&Value::Bool(true)));
        assert!(truthy(&Value::Number(2.0)));
        assert!(truthy(&Value::from("yes")));
        assert!(truthy(&Value::from("anything")));
        assert!(truthy(&Value::Array(vec![Value::Null])));

        assert!(!truthy(&Value::Null));
        assert!(!truthy(&Value::Bool(false)));
        assert!(!truthy(&Value::Number(0.0)));
        assert!(!truthy(&Value::from("")));
        assert!(!truthy(&Value::from("False")));
        assert!(!truthy(&Value::from(" off ")));
        assert!(!truthy(&Value::Array(vec![])));
    }

    #[test]
    fn test_sanitize_to_bool() {
        let def = definition();
        assert_eq!(def.sanitize(&Value::from("no"), &Params::new()), Value::Bool(false));
        assert_eq!(def.sanitize(&Value::from("1"), &Params::new()), Value::Bool(true));
        assert_eq!(def.sanitize(&Value::Null, &Params::new()), Value::Bool(false));
    }
}
