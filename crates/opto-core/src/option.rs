//! A single declared option
//!
//! An `Opt` owns its raw value, the sanitized value derived from it and the
//! validation errors derived from that. Assigning a raw value (or changing a
//! parameter) re-runs sanitize and validate immediately.

use crate::condition::{self, ValueSource};
use crate::declaration::{
    normalize_key, Declaration, DEFAULT_KEY, IF_KEY, NAME_KEY, OUTPUT_KEY, TYPE_KEY, UNLESS_KEY, VALUE_KEY,
};
use crate::error::{OptoError, Result};
use crate::group::GroupId;
use crate::output::{self, OutputAction};
use crate::types::boolean::truthy;
use crate::types::{Errors, Params, PluginRegistry, TypeDefinition, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A declared, sanitized and validated option
#[derive(Clone)]
pub struct Opt {
    name: String,
    type_name: String,
    definition: Arc<TypeDefinition>,
    /// Parameters as declared, used for serialization
    declared: Params,
    /// Group defaults for parameters the declaration leaves out
    inherited: Params,
    /// Declared parameters merged over the type defaults
    options: Params,
    if_conditions: Value,
    unless_conditions: Value,
    output_spec: Value,
    output: Option<OutputAction>,
    default: Value,
    raw_value: Value,
    value: Value,
    errors: Errors,
    group: Option<GroupId>,
}

impl Opt {
    /// Build an option from a declaration mapping
    pub fn new(declaration: &Value, registry: &PluginRegistry) -> Result<Self> {
        Self::from_declaration(Declaration::parse(declaration)?, registry, None)
    }

    /// Build an option from a parsed declaration.
    ///
    /// `group_defaults` fill type parameters the declaration leaves out;
    /// keys the type does not know are ignored.
    pub fn from_declaration(
        declaration: Declaration,
        registry: &PluginRegistry,
        group_defaults: Option<&Params>,
    ) -> Result<Self> {
        let definition = registry.resolve(&declaration.type_name)?;
        let output = output::resolve(&declaration.name, &declaration.output, registry)?;

        let declared = declaration.params;
        let mut inherited = Params::new();
        for (key, value) in group_defaults.into_iter().flatten() {
            let key = normalize_key(key);
            if definition.default_options().contains_key(&key) && !declared.contains_key(&key) {
                inherited.insert(key, value.clone());
            }
        }
        let options = merge_params(&definition, &inherited, &declared);

        let mut opt = Self {
            name: declaration.name,
            type_name: declaration.type_name,
            definition,
            declared,
            inherited,
            options,
            if_conditions: declaration.if_conditions,
            unless_conditions: declaration.unless_conditions,
            output_spec: declaration.output,
            output,
            default: declaration.default,
            raw_value: Value::Null,
            value: Value::Null,
            errors: Errors::new(),
            group: None,
        };
        opt.set_value(declaration.value);
        log::debug!("built option '{}' of type '{}'", opt.name, opt.type_name);
        Ok(opt)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Merged parameters
    pub fn options(&self) -> &Params {
        &self.options
    }

    pub fn declared_options(&self) -> &Params {
        &self.declared
    }

    pub fn if_conditions(&self) -> &Value {
        &self.if_conditions
    }

    pub fn unless_conditions(&self) -> &Value {
        &self.unless_conditions
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn raw_value(&self) -> &Value {
        &self.raw_value
    }

    /// The sanitized value
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: Option<GroupId>) {
        self.group = group;
    }

    /// Assign a raw value and re-run sanitize and validate.
    ///
    /// An absent raw value falls back to the declared `default`.
    pub fn set_value(&mut self, raw: impl Into<Value>) {
        self.raw_value = raw.into();
        self.refresh();
    }

    /// Change one parameter and re-run sanitize and validate
    pub fn set_option(&mut self, key: &str, value: impl Into<Value>) {
        self.declared.insert(normalize_key(key), value.into());
        self.options = merge_params(&self.definition, &self.inherited, &self.declared);
        self.refresh();
    }

    fn refresh(&mut self) {
        let effective = if self.raw_value.is_null() {
            &self.default
        } else {
            &self.raw_value
        };
        self.value = self.definition.sanitize(effective, &self.options);
        self.errors = self.definition.validate(&self.value, &self.options);
    }

    /// No validator reported an error. Independent of whether the option is skipped.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Boolean interpretation of the sanitized value
    pub fn is_true(&self) -> bool {
        truthy(&self.value)
    }

    /// Whether the `if` / `unless` conditions make this option inactive.
    ///
    /// Active when every `if` predicate holds and no `unless` predicate holds.
    /// Siblings are resolved by the owning group, see `Group::is_skipped`.
    pub(crate) fn is_skipped(&self, siblings: &dyn ValueSource) -> Result<bool> {
        let wanted = self.if_conditions.is_null()
            || condition::all_true(&self.if_conditions, siblings)?;
        let excluded = !self.unless_conditions.is_null()
            && condition::any_true(&self.unless_conditions, siblings)?;
        Ok(!(wanted && !excluded))
    }

    /// Attach an output action, replacing the declared one
    pub fn set_output(&mut self, action: OutputAction) {
        self.output = Some(action);
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    /// Invoke the output action with the sanitized value
    pub fn output(&self) {
        if let Some(action) = &self.output {
            log::debug!("running output of '{}'", self.name);
            action(&self.value);
        }
    }

    /// Serializable record: `{name, type, <declared parameters...>}` plus
    /// conditions, default and output when declared, and optionally the
    /// sanitized value and errors.
    pub fn to_h(&self, with_value: bool, with_errors: bool) -> Value {
        let mut map = IndexMap::new();
        map.insert(NAME_KEY.to_string(), Value::String(self.name.clone()));
        map.insert(TYPE_KEY.to_string(), Value::String(self.type_name.clone()));
        for (key, value) in &self.declared {
            map.insert(key.clone(), value.clone());
        }
        for (key, value) in [
            (DEFAULT_KEY, &self.default),
            (IF_KEY, &self.if_conditions),
            (UNLESS_KEY, &self.unless_conditions),
            (OUTPUT_KEY, &self.output_spec),
        ] {
            if !value.is_null() {
                map.insert(key.to_string(), value.clone());
            }
        }
        if with_value {
            map.insert(VALUE_KEY.to_string(), self.value.clone());
        }
        if with_errors {
            let errors = self
                .errors
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            map.insert("errors".to_string(), Value::Object(errors));
        }
        Value::Object(map)
    }
}

// Type defaults, then group defaults, then declared parameters.
fn merge_params(definition: &TypeDefinition, inherited: &Params, declared: &Params) -> Params {
    let mut params = inherited.clone();
    params.extend(declared.iter().map(|(k, v)| (k.clone(), v.clone())));
    definition.merge_options(&params)
}

impl TryFrom<&Value> for Opt {
    type Error = OptoError;

    /// Build against the built-in registry
    fn try_from(declaration: &Value) -> Result<Self> {
        Opt::new(declaration, &PluginRegistry::default())
    }
}

impl fmt::Debug for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opt")
            .field("name", &self.name)
            .field("type", &self.type_name)
            .field("options", &self.options)
            .field("raw_value", &self.raw_value)
            .field("value", &self.value)
            .field("errors", &self.errors)
            .field("group", &self.group)
            .finish()
    }
}
