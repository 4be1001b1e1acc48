//! Integration tests for custom option types

mod common;

use common::load_group;
use opto_sdk::{Errors, Opto, Params, TypeDefinition, Value};

fn port_type() -> TypeDefinition {
    TypeDefinition::new("Port")
        .with_default("min", 1)
        .with_default("max", 65535)
        .with_sanitizer(|raw: &Value, _options: &Params| match raw {
            Value::String(s) => s.trim().parse::<f64>().map(Value::Number).unwrap_or(Value::Null),
            other => other.clone(),
        })
        .with_validator("range", |value: &Value, options: &Params| {
            let (Some(v), Some(min), Some(max)) = (
                value.as_f64(),
                options.get("min").and_then(Value::as_f64),
                options.get("max").and_then(Value::as_f64),
            ) else {
                return None;
            };
            (v < min || v > max).then(|| format!("Port {} outside {}..={}", v, min, max))
        })
}

#[test]
fn test_custom_type_pipeline() {
    let opto = Opto::builder().register_type(port_type()).build();
    assert!(opto.registry().contains("port"));

    let yaml = r#"
- { name: http, type: Port, value: " 8080 " }
- { name: bad, type: port, value: 70000 }
"#;

    let group = load_group(&opto, yaml);
    assert_eq!(group.value_of("http"), Some(&Value::Number(8080.0)));
    assert!(group.option("http").unwrap().is_valid());

    let errors: &Errors = group.option("bad").unwrap().errors();
    assert_eq!(errors.get("range").unwrap(), "Port 70000 outside 1..=65535");
}

#[test]
fn test_registration_replaces_builtin() {
    let opto = Opto::builder()
        .register_type(TypeDefinition::new("integer").with_default("min", 10))
        .build();

    let group = load_group(&opto, "- { name: n, type: integer, value: 3 }");
    let opt = group.option("n").unwrap();

    assert_eq!(opt.options().get("min"), Some(&Value::Number(10.0)));
    assert_eq!(opt.value(), &Value::from("3"));
    assert!(opt.is_valid());
}
