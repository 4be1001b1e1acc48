//! Custom option type example
//!
//! This example demonstrates:
//! - Registering a custom type with defaults, a sanitizer and validators
//! - Registering a custom output handler
//! - Building a single option and a group with the same facade

use opto_sdk::{Opto, Params, TypeDefinition, Value};
use serde_json::json;
use std::sync::Arc;

fn port_type() -> TypeDefinition {
    TypeDefinition::new("port")
        .with_default("privileged", false)
        .with_sanitizer(|raw: &Value, _options: &Params| match raw {
            Value::Number(n) => Value::Number(n.trunc()),
            Value::String(s) => s
                .trim()
                .trim_start_matches(':')
                .parse::<f64>()
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        })
        .with_validator("range", |value: &Value, _options: &Params| {
            let port = value.as_f64()?;
            (!(1.0..=65535.0).contains(&port))
                .then(|| format!("Port must be between 1 and 65535, got {}", port))
        })
        .with_validator("privileged", |value: &Value, options: &Params| {
            let port = value.as_f64()?;
            let allowed = options.get("privileged").and_then(Value::as_bool).unwrap_or(false);
            (port < 1024.0 && !allowed)
                .then(|| format!("Port {} is privileged", port))
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Custom Type Example ===\n");

    let opto = Opto::builder()
        .register_type(port_type())
        .register_output(
            "env",
            Arc::new(|name: &str, prefix: &Value, value: &Value| {
                println!("  export {}{}={}", prefix, name.to_uppercase(), value);
            }),
        )
        .build();

    println!("Registered types: {:?}\n", opto.registry().type_names());

    let single = opto
        .build(&Value::from(json!({"name": "admin_port", "type": "port", "value": ":80"})))?
        .into_option()?;
    println!("admin_port = {} (valid: {})", single.value(), single.is_valid());
    for (validator, message) in single.errors() {
        println!("  [{}] {}", validator, message);
    }

    let declarations = json!([
        {"name": "http_port", "type": "port", "value": "8080", "output": {"env": "APP_"}},
        {"name": "tls", "type": "boolean", "value": "yes"},
        {"name": "https_port", "type": "port", "privileged": true, "value": 443,
         "if": "tls", "output": {"env": "APP_"}}
    ]);
    let group = opto.build(&Value::from(declarations))?.into_group()?;

    println!("\nGroup valid: {}", group.is_valid());
    println!("Exports:");
    group.run()?;

    Ok(())
}
