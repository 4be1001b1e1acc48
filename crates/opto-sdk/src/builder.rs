//! Builder pattern for the Opto facade

use crate::config::EngineConfig;
use crate::opto::Opto;
use opto_core::{OutputHandler, PluginRegistry, TypeDefinition, Value};

/// Builder for `Opto`
///
/// # Example
///
/// ```rust,ignore
/// use opto_sdk::{OptoBuilder, TypeDefinition, Value};
///
/// let opto = OptoBuilder::new()
///     .register_type(
///         TypeDefinition::new("port")
///             .with_default("min", 1)
///             .with_default("max", 65535),
///     )
///     .with_default("nil_is_zero", true)
///     .unique_names(true)
///     .build();
/// ```
pub struct OptoBuilder {
    config: EngineConfig,
    registry: PluginRegistry,
}

impl OptoBuilder {
    /// Create a new builder with the built-in types
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            registry: PluginRegistry::with_builtins(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a different registry
    pub fn with_registry(mut self, registry: PluginRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register an option type (replaces a type of the same name)
    pub fn register_type(mut self, definition: TypeDefinition) -> Self {
        self.registry.register(definition);
        self
    }

    /// Register an output handler
    pub fn register_output(mut self, name: &str, handler: OutputHandler) -> Self {
        self.registry.register_output(name, handler);
        self
    }

    /// Add a group default
    pub fn with_default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config = self.config.with_default(key, value);
        self
    }

    /// Reject duplicate option names
    pub fn unique_names(mut self, unique: bool) -> Self {
        self.config.group.unique_names = unique;
        self
    }

    /// Top-level key for `Opto::load`
    pub fn root_key(mut self, key: impl Into<String>) -> Self {
        self.config.root_key = Some(key.into());
        self
    }

    /// Build the facade
    pub fn build(self) -> Opto {
        tracing::debug!(
            types = ?self.registry.type_names(),
            unique_names = self.config.group.unique_names,
            "building opto facade"
        );
        Opto::from_parts(self.registry, self.config)
    }
}

impl Default for OptoBuilder {
    fn default() -> Self {
        Self::new()
    }
}
