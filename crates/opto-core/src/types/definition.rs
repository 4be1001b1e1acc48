//! Type definitions: default parameters, a sanitizer and ordered validators

use super::value::Value;
use crate::declaration::normalize_key;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Type parameters, keyed by canonical (normalized) name
pub type Params = IndexMap<String, Value>;

/// Validation errors of one option, keyed by validator name
pub type Errors = IndexMap<String, String>;

/// Turns a raw value into the type's canonical form
pub type Sanitizer = Arc<dyn Fn(&Value, &Params) -> Value + Send + Sync>;

/// Returns an error message for an invalid sanitized value, `None` otherwise
pub type ValidatorFn = Arc<dyn Fn(&Value, &Params) -> Option<String> + Send + Sync>;

/// A named option type
///
/// Validators run in the order they were added. A type without a sanitizer
/// passes raw values through unchanged.
#[derive(Clone)]
pub struct TypeDefinition {
    name: String,
    default_options: Params,
    sanitizer: Option<Sanitizer>,
    validators: Vec<(String, ValidatorFn)>,
}

impl TypeDefinition {
    /// Create an empty type definition
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_options: Params::new(),
            sanitizer: None,
            validators: Vec::new(),
        }
    }

    /// Add a default parameter
    pub fn with_default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.default_options.insert(normalize_key(key), value.into());
        self
    }

    /// Set the sanitizer, replacing any previous one
    pub fn with_sanitizer<F>(mut self, sanitizer: F) -> Self
    where
        F: Fn(&Value, &Params) -> Value + Send + Sync + 'static,
    {
        self.sanitizer = Some(Arc::new(sanitizer));
        self
    }

    /// Append a validator. Re-using a name replaces that validator in place.
    pub fn with_validator<F>(mut self, name: &str, validator: F) -> Self
    where
        F: Fn(&Value, &Params) -> Option<String> + Send + Sync + 'static,
    {
        let name = normalize_key(name);
        let validator: ValidatorFn = Arc::new(validator);
        match self.validators.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = validator,
            None => self.validators.push((name, validator)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_options(&self) -> &Params {
        &self.default_options
    }

    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Merge declared parameters over the defaults; declared values win.
    pub fn merge_options(&self, declared: &Params) -> Params {
        let mut merged = self.default_options.clone();
        for (key, value) in declared {
            merged.insert(normalize_key(key), value.clone());
        }
        merged
    }

    pub fn sanitize(&self, raw: &Value, options: &Params) -> Value {
        match &self.sanitizer {
            Some(sanitizer) => sanitizer(raw, options),
            None => raw.clone(),
        }
    }

    /// Run every validator in order, keeping only the failures.
    pub fn validate(&self, value: &Value, options: &Params) -> Errors {
        self.validators
            .iter()
            .filter_map(|(name, validator)| {
                validator(value, options).map(|message| (name.clone(), message))
            })
            .collect()
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("name", &self.name)
            .field("default_options", &self.default_options)
            .field("sanitizer", &self.sanitizer.is_some())
            .field("validators", &self.validator_names())
            .finish()
    }
}

/// Read a numeric parameter. Numeric strings are accepted.
pub fn param_f64(options: &Params, key: &str) -> Option<f64> {
    match options.get(key)? {
        Value::Number(n) => Some(*n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a flag parameter using option truthiness.
pub fn param_flag(options: &Params, key: &str) -> bool {
    options.get(key).map(super::boolean::truthy).unwrap_or(false)
}
