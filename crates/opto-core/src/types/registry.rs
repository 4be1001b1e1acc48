//! Plugin Registry
//!
//! Resolves type names to their definitions and output handler names to
//! handlers. Names are looked up in snake case, so `Integer` finds `integer`.

use super::definition::{Errors, Params, TypeDefinition};
use super::value::Value;
use super::{boolean, integer, string};
use crate::declaration::{normalize_key, snake_case};
use crate::error::{OptoError, Result};
use crate::output::{self, OutputHandler};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Central plugin registry
#[derive(Clone)]
pub struct PluginRegistry {
    types: HashMap<String, Arc<TypeDefinition>>,
    outputs: HashMap<String, OutputHandler>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            outputs: HashMap::new(),
        }
    }

    /// Create a registry with the built-in types and the `log` output
    pub fn with_builtins() -> Self {
        Self::new()
            .with_type(integer::definition())
            .with_type(string::definition())
            .with_type(boolean::definition())
            .with_output(output::LOG_HANDLER, output::log_handler())
    }

    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn with_output(mut self, name: &str, handler: OutputHandler) -> Self {
        self.register_output(name, handler);
        self
    }

    /// Register a type; a later registration under the same name replaces
    /// the earlier one, which is returned.
    pub fn register(&mut self, definition: TypeDefinition) -> Option<Arc<TypeDefinition>> {
        let name = snake_case(definition.name());
        log::debug!("registering option type '{}'", name);
        self.types.insert(name, Arc::new(definition))
    }

    pub fn register_output(&mut self, name: &str, handler: OutputHandler) {
        let name = normalize_key(name);
        log::debug!("registering output handler '{}'", name);
        self.outputs.insert(name, handler);
    }

    pub fn get(&self, type_name: &str) -> Option<Arc<TypeDefinition>> {
        self.types.get(&snake_case(type_name)).cloned()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(&snake_case(type_name))
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn output_handler(&self, name: &str) -> Option<OutputHandler> {
        self.outputs.get(&normalize_key(name)).cloned()
    }

    /// Like `get`, failing with `UnknownType`
    pub fn resolve(&self, type_name: &str) -> Result<Arc<TypeDefinition>> {
        self.get(type_name)
            .ok_or_else(|| OptoError::UnknownType(type_name.to_string()))
    }

    /// Merge declared parameters over the type's defaults
    pub fn instantiate(&self, type_name: &str, declared: &Params) -> Result<Params> {
        Ok(self.resolve(type_name)?.merge_options(declared))
    }

    pub fn sanitize(&self, type_name: &str, raw: &Value, options: &Params) -> Result<Value> {
        Ok(self.resolve(type_name)?.sanitize(raw, options))
    }

    pub fn validate(&self, type_name: &str, value: &Value, options: &Params) -> Result<Errors> {
        Ok(self.resolve(type_name)?.validate(value, options))
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut outputs: Vec<&String> = self.outputs.keys().collect();
        outputs.sort();
        f.debug_struct("PluginRegistry")
            .field("types", &self.type_names())
            .field("outputs", &outputs)
            .finish()
    }
}
