//! Output actions
//!
//! An output action receives an option's sanitized value when its group
//! runs. Declarations name registered handlers:
//!
//! ```yaml
//! output: log                 # handler without argument
//! output: { log: "deploy" }   # handler with argument
//! ```

use crate::error::{OptoError, Result};
use crate::types::{PluginRegistry, Value};
use std::sync::Arc;

/// Action bound to one option
pub type OutputAction = Arc<dyn Fn(&Value) + Send + Sync>;

/// Registered handler: `(option name, declared argument, sanitized value)`
pub type OutputHandler = Arc<dyn Fn(&str, &Value, &Value) + Send + Sync>;

pub const LOG_HANDLER: &str = "log";

/// Built-in handler writing the value through the `log` facade
pub fn log_handler() -> OutputHandler {
    Arc::new(|name: &str, argument: &Value, value: &Value| {
        if argument.is_null() {
            log::info!("{} = {}", name, value);
        } else {
            log::info!("[{}] {} = {}", argument, name, value);
        }
    })
}

/// Bind the handlers named by an `output` declaration to one option
pub fn resolve(option_name: &str, spec: &Value, registry: &PluginRegistry) -> Result<Option<OutputAction>> {
    let bindings: Vec<(String, Value)> = match spec {
        Value::Null => return Ok(None),
        Value::String(handler) => vec![(handler.clone(), Value::Null)],
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        other => {
            return Err(OptoError::InvalidDeclaration(format!(
                "output of '{}' must be a handler name or mapping, got {}",
                option_name,
                other.type_name()
            )))
        }
    };

    let mut handlers = Vec::with_capacity(bindings.len());
    for (handler_name, argument) in bindings {
        let handler = registry.output_handler(&handler_name).ok_or_else(|| {
            OptoError::InvalidDeclaration(format!(
                "unknown output handler '{}' for '{}'",
                handler_name, option_name
            ))
        })?;
        handlers.push((handler, argument));
    }

    let name = option_name.to_string();
    Ok(Some(Arc::new(move |value: &Value| {
        for (handler, argument) in &handlers {
            handler(&name, argument, value);
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_resolve_null_is_none() {
        let registry = PluginRegistry::default();
        assert!(resolve("x", &Value::Null, &registry).unwrap().is_none());
    }

    #[test]
    fn test_resolve_unknown_handler() {
        let registry = PluginRegistry::default();
        let err = resolve("x", &Value::from("smtp"), &registry).err().unwrap();
        assert!(matches!(err, OptoError::InvalidDeclaration(_)));
    }

    #[test]
    fn test_resolve_with_argument() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let registry = PluginRegistry::default().with_output(
            "collect",
            Arc::new(move |name: &str, argument: &Value, value: &Value| {
                sink.lock()
                    .unwrap()
                    .push(format!("{}:{}:{}", name, argument, value));
            }),
        );

        let mut spec = indexmap::IndexMap::new();
        spec.insert("collect".to_string(), Value::from("env"));
        let action = resolve("port", &Value::Object(spec), &registry).unwrap().unwrap();
        action(&Value::Number(8080.0));

        assert_eq!(*seen.lock().unwrap(), vec!["port:env:8080".to_string()]);
    }
}
