//! A number.
//!
//! Options
//! - `min`: minimum allowed value (default 0, can be negative)
//! - `max`: maximum allowed value (default none)
//! - `nil_is_zero`: turn an absent value into 0 (default false)

use super::definition::{param_f64, param_flag, Params, TypeDefinition};
use super::value::Value;

pub const NAME: &str = "integer";

pub fn definition() -> TypeDefinition {
    TypeDefinition::new(NAME)
        .with_default("min", 0)
        .with_default("max", Value::Null)
        .with_default("nil_is_zero", false)
        .with_sanitizer(sanitize)
        .with_validator("min", validate_min)
        .with_validator("max", validate_max)
}

fn sanitize(value: &Value, options: &Params) -> Value {
    match value {
        Value::Null if param_flag(options, "nil_is_zero") => Value::Number(0.0),
        Value::Null => Value::Null,
        other => to_integer(other),
    }
}

/// Permissive integer cast: numbers truncate, strings keep their leading
/// digits, anything without digits is 0.
pub fn to_integer(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Number(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) if n.is_finite() => Value::Number(n.trunc()),
        Value::Number(_) => Value::Null,
        Value::String(s) => Value::Number(leading_integer(s)),
        Value::Array(_) | Value::Object(_) => Value::Null,
    }
}

fn leading_integer(s: &str) -> f64 {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit() && c != '_')
        .unwrap_or(digits.len());
    let number: String = digits[..end].chars().filter(|c| *c != '_').collect();
    number.parse::<f64>().map(|n| sign * n).unwrap_or(0.0)
}

fn validate_min(value: &Value, options: &Params) -> Option<String> {
    let value = value.as_f64()?;
    let min = param_f64(options, "min")?;
    (value < min).then(|| {
        format!(
            "Too small. Minimum value is {}, Value is {}.",
            Value::Number(min),
            Value::Number(value)
        )
    })
}

fn validate_max(value: &Value, options: &Params) -> Option<String> {
    let value = value.as_f64()?;
    let max = param_f64(options, "max")?;
    (value > max).then(|| {
        format!(
            "Too large. Maximum value is {}, Value is {}.",
            Value::Number(max),
            Value::Number(value)
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, Value)]) -> Params {
        let declared: Params = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        definition().merge_options(&declared)
    }

    #[test]
    fn test_sanitize_coerces_to_integer() {
        let opts = options(&[]);
        let def = definition();
        assert_eq!(def.sanitize(&Value::from("42"), &opts), Value::Number(42.0));
        assert_eq!(def.sanitize(&Value::from(" -7abc"), &opts), Value::Number(-7.0));
        assert_eq!(def.sanitize(&Value::from("abc"), &opts), Value::Number(0.0));
        assert_eq!(def.sanitize(&Value::Number(3.9), &opts), Value::Number(3.0));
        assert_eq!(def.sanitize(&Value::Bool(true), &opts), Value::Number(1.0));
        assert_eq!(def.sanitize(&Value::Array(vec![]), &opts), Value::Null);
    }

    #[test]
    fn test_nil_is_zero() {
        let def = definition();
        assert_eq!(def.sanitize(&Value::Null, &options(&[])), Value::Null);
        assert_eq!(
            def.sanitize(&Value::Null, &options(&[("nil_is_zero", Value::Bool(true))])),
            Value::Number(0.0)
        );
    }

    #[test]
    fn test_within_bounds_is_valid() {
        let def = definition();
        let opts = options(&[("min", Value::Number(1.0)), ("max", Value::Number(10.0))]);
        for n in 1..=10 {
            assert!(def.validate(&Value::from(n), &opts).is_empty(), "{} should be valid", n);
        }
    }

    #[test]
    fn test_out_of_bounds_reports_single_validator() {
        let def = definition();
        let opts = options(&[("min", Value::Number(1.0)), ("max", Value::Number(10.0))]);

        let errors = def.validate(&Value::from(11), &opts);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("max"),
            Some(&"Too large. Maximum value is 10, Value is 11.".to_string())
        );

        let errors = def.validate(&Value::from(0), &opts);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("min"),
            Some(&"Too small. Minimum value is 1, Value is 0.".to_string())
        );
    }

    #[test]
    fn test_absent_value_is_never_out_of_bounds() {
        let def = definition();
        let opts = options(&[("min", Value::Number(5.0)), ("max", Value::Number(1.0))]);
        assert!(def.validate(&Value::Null, &opts).is_empty());
    }

    #[test]
    fn test_default_min_is_zero() {
        let def = definition();
        let errors = def.validate(&Value::from(-1), &options(&[]));
        assert!(errors.contains_key("min"));
        assert!(!errors.contains_key("max"));
    }
}
