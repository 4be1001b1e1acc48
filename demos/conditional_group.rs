//! Conditional option group example
//!
//! This example demonstrates:
//! - Loading a group of option declarations from YAML
//! - Assigning raw values and reading sanitized values and errors
//! - Running the group so only active, valid options reach their outputs

use opto_sdk::{Opto, ToHashOptions};

const DECLARATIONS: &str = r#"
settings:
  - name: environment
    type: string
    downcase: true
    value: PRODUCTION
    output: { log: deploy }
  - name: replicas
    type: integer
    min: 1
    max: 10
    output: { log: deploy }
  - name: debug
    type: boolean
    value: "off"
    unless:
      environment: production
    output: log
  - name: canary_percent
    type: integer
    max: 100
    if:
      replicas:
        gte: 3
    output: { log: deploy }
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("opto_core=info".parse()?)
                .add_directive("opto_sdk=debug".parse()?),
        )
        .init();

    println!("=== Conditional Group Example ===\n");

    let opto = Opto::builder().root_key("settings").build();
    let mut group = opto.load(DECLARATIONS)?.into_group()?;

    group.set_value("replicas", "12")?;
    group.set_value("canary_percent", 25)?;

    println!("Valid: {}", group.is_valid());
    for (name, errors) in group.errors() {
        for (validator, message) in errors {
            println!("  {} [{}]: {}", name, validator, message);
        }
    }

    group.set_value("replicas", 4)?;
    println!("\nAfter fixing replicas, valid: {}", group.is_valid());

    for opt in group.iter() {
        println!("  {:<16} skipped: {}", opt.name(), group.is_skipped(opt.name())?);
    }

    println!("\nRunning outputs:");
    let ran = group.run()?;
    println!("{} option(s) produced output\n", ran);

    let values = group.to_h(ToHashOptions {
        values_only: true,
        ..Default::default()
    });
    println!("Values: {}", serde_json::to_string_pretty(&values)?);

    Ok(())
}
