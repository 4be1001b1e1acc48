//! Opto facade
//!
//! Builds a single option from one declaration mapping, or a group from a
//! sequence of declarations.

use crate::builder::OptoBuilder;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use opto_core::declaration::Declaration;
use opto_core::{Group, Opt, OptoError, PluginRegistry, Value};
use opto_parser::YamlLoader;
use std::io::Read;

/// What the facade built from a declaration value
#[derive(Debug, Clone)]
pub enum Built {
    Option(Opt),
    Group(Group),
}

impl Built {
    pub fn is_group(&self) -> bool {
        matches!(self, Built::Group(_))
    }

    pub fn as_option(&self) -> Option<&Opt> {
        match self {
            Built::Option(opt) => Some(opt),
            Built::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Built::Group(group) => Some(group),
            Built::Option(_) => None,
        }
    }

    /// Unwrap a group, failing with `UnexpectedShape` for a single option
    pub fn into_group(self) -> Result<Group> {
        match self {
            Built::Group(group) => Ok(group),
            Built::Option(_) => Err(SdkError::UnexpectedShape {
                expected: "group",
                actual: "option",
            }),
        }
    }

    /// Unwrap a single option, failing with `UnexpectedShape` for a group
    pub fn into_option(self) -> Result<Opt> {
        match self {
            Built::Option(opt) => Ok(opt),
            Built::Group(_) => Err(SdkError::UnexpectedShape {
                expected: "option",
                actual: "group",
            }),
        }
    }
}

/// Entry point for building options and groups
#[derive(Debug, Clone, Default)]
pub struct Opto {
    registry: PluginRegistry,
    config: EngineConfig,
}

impl Opto {
    /// Facade with the built-in types and default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> OptoBuilder {
        OptoBuilder::new()
    }

    pub(crate) fn from_parts(registry: PluginRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build from a declaration value.
    ///
    /// A mapping yields a single option, a sequence of mappings yields a
    /// group. Any other shape is an `InvalidDeclaration`.
    pub fn build(&self, declarations: &Value) -> Result<Built> {
        match declarations {
            Value::Object(_) => {
                tracing::debug!("building single option");
                Ok(Built::Option(self.option(declarations)?))
            }
            Value::Array(items) if items.iter().all(|item| matches!(item, Value::Object(_))) => {
                tracing::debug!(count = items.len(), "building option group");
                Ok(Built::Group(self.group(declarations)?))
            }
            other => Err(OptoError::InvalidDeclaration(format!(
                "invalid type {} for option declarations",
                other.type_name()
            ))
            .into()),
        }
    }

    /// Build one option, applying the configured group defaults
    pub fn option(&self, declaration: &Value) -> Result<Opt> {
        let declaration = Declaration::parse(declaration)?;
        let opt = Opt::from_declaration(declaration, &self.registry, Some(&self.config.group.defaults))?;
        Ok(opt)
    }

    /// Build a group; accepts every shape `Group::with_config` does,
    /// including the `name => declaration` mapping form
    pub fn group(&self, declarations: &Value) -> Result<Group> {
        let group = Group::with_config(declarations, self.config.group.clone(), &self.registry)?;
        Ok(group)
    }

    /// Append one declaration to an existing group
    pub fn build_option<'g>(&self, group: &'g mut Group, declaration: &Value) -> Result<&'g Opt> {
        tracing::debug!(group = ?group.id(), "appending option to group");
        Ok(group.build_option(declaration, &self.registry)?)
    }

    /// Load YAML, reading declarations from the configured `root_key`
    pub fn load(&self, yaml: &str) -> Result<Built> {
        self.load_with_key(yaml, self.config.root_key.as_deref())
    }

    /// Load YAML, reading declarations from `key` when given
    pub fn load_with_key(&self, yaml: &str, key: Option<&str>) -> Result<Built> {
        tracing::debug!(key = ?key, "loading declarations from yaml");
        let declarations = YamlLoader::load_str(yaml, key)?;
        self.build(&declarations)
    }

    /// Load a YAML document from a byte source
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Built> {
        let key = self.config.root_key.as_deref();
        tracing::debug!(key = ?key, "loading declarations from reader");
        let declarations = YamlLoader::load_reader(reader, key)?;
        self.build(&declarations)
    }
}

/// Build with the default facade
pub fn build(declarations: &Value) -> Result<Built> {
    Opto::new().build(declarations)
}

/// Load YAML with the default facade, selecting `key` when given
pub fn load(yaml: &str, key: Option<&str>) -> Result<Built> {
    Opto::new().load_with_key(yaml, key)
}
