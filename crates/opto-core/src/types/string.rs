//! A string.
//!
//! Options
//! - `min_length` (default 0), `max_length` (default none)
//! - `strip`, `upcase`, `downcase` transformations (default false)

use super::definition::{param_f64, param_flag, Params, TypeDefinition};
use super::value::Value;

pub const NAME: &str = "string";

pub fn definition() -> TypeDefinition {
    TypeDefinition::new(NAME)
        .with_default("min_length", 0)
        .with_default("max_length", Value::Null)
        .with_default("strip", false)
        .with_default("upcase", false)
        .with_default("downcase", false)
        .with_sanitizer(sanitize)
        .with_validator("min_length", validate_min_length)
        .with_validator("max_length", validate_max_length)
}

fn sanitize(value: &Value, options: &Params) -> Value {
    if value.is_null() {
        return Value::Null;
    }
    let mut s = value.to_display_string();
    if param_flag(options, "strip") {
        s = s.trim().to_string();
    }
    if param_flag(options, "upcase") {
        s = s.to_uppercase();
    } else if param_flag(options, "downcase") {
        s = s.to_lowercase();
    }
    Value::String(s)
}

fn validate_min_length(value: &Value, options: &Params) -> Option<String> {
    let len = value.as_str()?.chars().count();
    let min = param_f64(options, "min_length")?;
    ((len as f64) < min).then(|| {
        format!("Too short. Minimum length is {}, length is {}.", Value::Number(min), len)
    })
}

fn validate_max_length(value: &Value, options: &Params) -> Option<String> {
    let len = value.as_str()?.chars().count();
    let max = param_f64(options, "max_length")?;
    ((len as f64) > max).then(|| {
        format!("Too long. Maximum length is {}, length is {}.", Value::Number(max), len)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_transformations() {
        let def = definition();
        let mut declared = Params::new();
        declared.insert("strip".to_string(), Value::Bool(true));
        declared.insert("upcase".to_string(), Value::Bool(true));
        let opts = def.merge_options(&declared);

        assert_eq!(def.sanitize(&Value::from("  abc "), &opts), Value::from("ABC"));
        assert_eq!(def.sanitize(&Value::Number(5.0), &opts), Value::from("5"));
        assert_eq!(def.sanitize(&Value::Null, &opts), Value::Null);
    }

    #[test]
    fn test_length_validators() {
        let def = definition();
        let mut declared = Params::new();
        declared.insert("min_length".to_string(), Value::Number(2.0));
        declared.insert("max_length".to_string(), Value::Number(4.0));
        let opts = def.merge_options(&declared);

        assert!(def.validate(&Value::from("abc"), &opts).is_empty());
        assert!(def.validate(&Value::Null, &opts).is_empty());

        let errors = def.validate(&Value::from("a"), &opts);
        assert_eq!(
            errors.get("min_length"),
            Some(&"Too short. Minimum length is 2, length is 1.".to_string())
        );

        let errors = def.validate(&Value::from("abcde"), &opts);
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["max_length"]);
    }
}
