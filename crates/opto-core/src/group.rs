//! A group of options
//!
//! Members of a group can see their siblings and their values, which is what
//! `if` / `unless` conditions are evaluated against. The group owns its
//! members; each member only carries the group's `GroupId`.
//!
//! For read-only enumeration and search a `Group` dereferences to a slice of
//! its members (`len`, `iter`, `first`, ...). Members are added through
//! `build_option` / `push_option` and changed through `set_value`, which keep
//! every member's `GroupId` pointing at this group.

use crate::condition::{self, ValueSource};
use crate::declaration::{normalize_key, Declaration, NAME_KEY};
use crate::error::{OptoError, Result};
use crate::option::Opt;
use crate::output::OutputAction;
use crate::types::{Errors, Params, PluginRegistry, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(1);

/// Handle identifying a group; members hold it instead of a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(u64);

impl GroupId {
    fn next() -> Self {
        GroupId(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Group construction settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Type parameters applied to members that do not declare them
    #[serde(default)]
    pub defaults: Params,

    /// Reject a member whose name is already taken
    #[serde(default)]
    pub unique_names: bool,
}

/// Flags for `Group::to_h`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToHashOptions {
    /// Flat `name => value` mapping
    pub values_only: bool,
    pub with_values: bool,
    pub with_errors: bool,
}

/// An ordered collection of options sharing a namespace
#[derive(Debug)]
pub struct Group {
    id: GroupId,
    options: Vec<Opt>,
    config: GroupConfig,
}

impl Group {
    /// Create an empty group
    pub fn empty() -> Self {
        Self::empty_with(GroupConfig::default())
    }

    fn empty_with(mut config: GroupConfig) -> Self {
        config.defaults = config
            .defaults
            .into_iter()
            .map(|(key, value)| (normalize_key(&key), value))
            .collect();
        Self {
            id: GroupId::next(),
            options: Vec::new(),
            config,
        }
    }

    /// Build a group from declarations.
    ///
    /// Accepts a sequence of declaration mappings, a mapping of
    /// `name => declaration`, or null for an empty group.
    pub fn new(declarations: &Value, registry: &PluginRegistry) -> Result<Self> {
        Self::with_config(declarations, GroupConfig::default(), registry)
    }

    pub fn with_defaults(
        declarations: &Value,
        defaults: Params,
        registry: &PluginRegistry,
    ) -> Result<Self> {
        let config = GroupConfig {
            defaults,
            ..GroupConfig::default()
        };
        Self::with_config(declarations, config, registry)
    }

    pub fn with_config(
        declarations: &Value,
        config: GroupConfig,
        registry: &PluginRegistry,
    ) -> Result<Self> {
        let mut group = Self::empty_with(config);
        match declarations {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    group.push_declaration(Declaration::parse(item)?, registry)?;
                }
            }
            Value::Object(map) => {
                for (name, declaration) in map {
                    group.push_declaration(Declaration::parse_named(name, declaration)?, registry)?;
                }
            }
            other => {
                return Err(OptoError::InvalidDeclaration(format!(
                    "invalid type {} for an option group",
                    other.type_name()
                )))
            }
        }
        log::debug!("built option group with {} member(s)", group.options.len());
        Ok(group)
    }

    /// Adopt already-built options
    pub fn from_options(options: Vec<Opt>) -> Self {
        let mut group = Self::empty();
        for opt in options {
            group.adopt(opt);
        }
        group
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    pub fn defaults(&self) -> &Params {
        &self.config.defaults
    }

    pub fn options(&self) -> &[Opt] {
        &self.options
    }

    /// Append a new member built from a declaration mapping
    pub fn build_option(&mut self, declaration: &Value, registry: &PluginRegistry) -> Result<&Opt> {
        self.push_declaration(Declaration::parse(declaration)?, registry)
    }

    /// Append an already-built option, taking it over from any previous group
    pub fn push_option(&mut self, opt: Opt) -> Result<&Opt> {
        self.check_name(opt.name())?;
        Ok(self.adopt(opt))
    }

    fn push_declaration(&mut self, declaration: Declaration, registry: &PluginRegistry) -> Result<&Opt> {
        self.check_name(&declaration.name)?;
        let opt = Opt::from_declaration(declaration, registry, Some(&self.config.defaults))?;
        Ok(self.adopt(opt))
    }

    fn check_name(&self, name: &str) -> Result<()> {
        if self.option(name).is_some() {
            if self.config.unique_names {
                return Err(OptoError::DuplicateName(name.to_string()));
            }
            log::warn!("option '{}' is declared more than once; the first one wins", name);
        }
        Ok(())
    }

    fn adopt(&mut self, mut opt: Opt) -> &Opt {
        opt.set_group(Some(self.id));
        let index = self.options.len();
        self.options.push(opt);
        &self.options[index]
    }

    /// Are all options valid?
    pub fn is_valid(&self) -> bool {
        self.options.iter().all(Opt::is_valid)
    }

    /// Members that are not valid
    pub fn options_with_errors(&self) -> Vec<&Opt> {
        self.options.iter().filter(|o| !o.is_valid()).collect()
    }

    /// Validation errors of invalid members: `{ option_name => { validator => message } }`
    pub fn errors(&self) -> IndexMap<String, Errors> {
        self.options_with_errors()
            .into_iter()
            .map(|o| (o.name().to_string(), o.errors().clone()))
            .collect()
    }

    /// Find a member by name (first match)
    pub fn option(&self, name: &str) -> Option<&Opt> {
        self.options.iter().find(|o| o.name() == name)
    }

    /// Sanitized value of a member, `None` if there is no such member
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.option(name).map(Opt::value)
    }

    /// Assign a member's raw value
    pub fn set_value(&mut self, name: &str, raw: impl Into<Value>) -> Result<&Opt> {
        let opt = self
            .options
            .iter_mut()
            .find(|o| o.name() == name)
            .ok_or_else(|| OptoError::OptionNotFound(name.to_string()))?;
        opt.set_value(raw);
        Ok(&*opt)
    }

    /// Attach an output action to a member
    pub fn set_output(&mut self, name: &str, action: OutputAction) -> Result<()> {
        let opt = self
            .options
            .iter_mut()
            .find(|o| o.name() == name)
            .ok_or_else(|| OptoError::OptionNotFound(name.to_string()))?;
        opt.set_output(action);
        Ok(())
    }

    pub fn any_true(&self, conditions: &Value) -> Result<bool> {
        condition::any_true(conditions, self)
    }

    pub fn all_true(&self, conditions: &Value) -> Result<bool> {
        condition::all_true(conditions, self)
    }

    /// Whether the named member is inactive given its siblings
    pub fn is_skipped(&self, name: &str) -> Result<bool> {
        let opt = self
            .option(name)
            .ok_or_else(|| OptoError::OptionNotFound(name.to_string()))?;
        debug_assert_eq!(opt.group_id(), Some(self.id));
        opt.is_skipped(self)
    }

    /// Members that are not skipped, in declaration order
    pub fn active_options(&self) -> Result<Vec<&Opt>> {
        let mut active = Vec::with_capacity(self.options.len());
        for opt in &self.options {
            if !opt.is_skipped(self)? {
                active.push(opt);
            }
        }
        Ok(active)
    }

    /// Run the outputs of every valid, non-skipped member in declaration
    /// order. Skip decisions are made for all members before the first
    /// output runs. Returns the number of members whose output ran.
    pub fn run(&self) -> Result<usize> {
        let selected: Vec<&Opt> = self
            .active_options()?
            .into_iter()
            .filter(|o| o.is_valid())
            .collect();
        for opt in &selected {
            opt.output();
        }
        log::debug!("ran outputs for {} of {} option(s)", selected.len(), self.options.len());
        Ok(selected.len())
    }

    /// One record per member, see `Opt::to_h`
    pub fn to_a(&self, with_value: bool, with_errors: bool) -> Vec<Value> {
        self.options
            .iter()
            .map(|o| o.to_h(with_value, with_errors))
            .collect()
    }

    /// `name => value` when `values_only`, otherwise `name => record` with
    /// the name left out of each record.
    pub fn to_h(&self, flags: ToHashOptions) -> Value {
        let map = self
            .options
            .iter()
            .map(|o| {
                let entry = if flags.values_only {
                    o.value().clone()
                } else {
                    match o.to_h(flags.with_values, flags.with_errors) {
                        Value::Object(mut record) => {
                            record.shift_remove(NAME_KEY);
                            Value::Object(record)
                        }
                        other => other,
                    }
                };
                (o.name().to_string(), entry)
            })
            .collect();
        Value::Object(map)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::empty()
    }
}

// A clone is a distinct group, so its members get the new id.
impl Clone for Group {
    fn clone(&self) -> Self {
        let mut group = Self::empty_with(self.config.clone());
        for opt in &self.options {
            group.adopt(opt.clone());
        }
        group
    }
}

impl Deref for Group {
    type Target = [Opt];

    fn deref(&self) -> &[Opt] {
        &self.options
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a Opt;
    type IntoIter = std::slice::Iter<'a, Opt>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}

impl ValueSource for Group {
    fn value_of(&self, name: &str) -> Option<&Value> {
        Group::value_of(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn group(json: serde_json::Value) -> Group {
        Group::new(&Value::from(json), &PluginRegistry::default()).unwrap()
    }

    #[test]
    fn test_members_point_back_to_group() {
        let g = group(json!([
            {"name": "a", "type": "integer"},
            {"name": "b", "type": "integer"}
        ]));
        assert_eq!(g.len(), 2);
        assert!(g.iter().all(|o| o.group_id() == Some(g.id())));
    }

    #[test]
    fn test_mapping_form() {
        let g = group(json!({
            "port": {"type": "integer", "value": 80},
            "host": {"type": "string"}
        }));
        assert_eq!(g.option("port").unwrap().value(), &Value::Number(80.0));
        assert_eq!(g.option("host").unwrap().type_name(), "string");
    }

    #[test]
    fn test_null_is_empty() {
        let g = group(json!(null));
        assert!(g.is_empty());
        assert!(g.is_valid());
    }

    #[test]
    fn test_invalid_shape() {
        let err = Group::new(&Value::from("nope"), &PluginRegistry::default()).unwrap_err();
        assert!(matches!(err, OptoError::InvalidDeclaration(_)));

        let err = Group::new(&Value::from(json!(["nope"])), &PluginRegistry::default()).unwrap_err();
        assert!(matches!(err, OptoError::InvalidDeclaration(_)));
    }

    #[test]
    fn test_value_of() {
        let g = group(json!([{"name": "a", "type": "integer", "value": 3}]));
        assert_eq!(g.value_of("a"), Some(&Value::Number(3.0)));
        assert_eq!(g.value_of("missing"), None);
    }

    #[test]
    fn test_duplicates_first_match_wins() {
        let g = group(json!([
            {"name": "a", "type": "integer", "value": 1},
            {"name": "a", "type": "integer", "value": 2}
        ]));
        assert_eq!(g.len(), 2);
        assert_eq!(g.value_of("a"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_unique_names_rejects_duplicates() {
        let config = GroupConfig {
            unique_names: true,
            ..GroupConfig::default()
        };
        let err = Group::with_config(
            &Value::from(json!([
                {"name": "a", "type": "integer"},
                {"name": "a", "type": "integer"}
            ])),
            config,
            &PluginRegistry::default(),
        )
        .unwrap_err();
        assert_eq!(err, OptoError::DuplicateName("a".to_string()));
    }

    #[test]
    fn test_group_defaults_fill_known_parameters() {
        let mut defaults = Params::new();
        defaults.insert("max".to_string(), Value::Number(5.0));
        defaults.insert("unrelated".to_string(), Value::Bool(true));

        let g = Group::with_defaults(
            &Value::from(json!([
                {"name": "a", "type": "integer", "value": 6},
                {"name": "b", "type": "integer", "value": 6, "max": 10}
            ])),
            defaults,
            &PluginRegistry::default(),
        )
        .unwrap();

        assert!(!g.option("a").unwrap().is_valid());
        assert!(g.option("b").unwrap().is_valid());
        assert!(!g.option("a").unwrap().options().contains_key("unrelated"));
    }

    #[test]
    fn test_symbol_style_group_defaults() {
        let mut defaults = Params::new();
        defaults.insert(":max".to_string(), Value::Number(5.0));

        let g = Group::with_defaults(
            &Value::from(json!([{"name": "a", "type": "integer", "value": 6}])),
            defaults,
            &PluginRegistry::default(),
        )
        .unwrap();

        assert!(g.defaults().contains_key("max"));
        let a = g.option("a").unwrap();
        assert_eq!(a.options().get("max"), Some(&Value::Number(5.0)));
        assert!(!a.is_valid());
    }

    #[test]
    fn test_group_defaults_not_serialized_as_declared() {
        let mut defaults = Params::new();
        defaults.insert("max".to_string(), Value::Number(5.0));

        let mut g = Group::with_defaults(
            &Value::from(json!([{"name": "a", "type": "integer"}])),
            defaults,
            &PluginRegistry::default(),
        )
        .unwrap();
        g.set_value("a", 6).unwrap();

        let a = g.option("a").unwrap();
        assert!(a.declared_options().is_empty());
        assert_eq!(
            serde_json::to_value(a.to_h(false, false)).unwrap(),
            json!({"name": "a", "type": "integer"})
        );
        assert!(!a.is_valid());
    }

    #[test]
    fn test_adopted_member_uses_new_siblings() {
        let first = group(json!([
            {"name": "flag", "type": "integer", "value": 1},
            {"name": "x", "type": "integer", "if": "flag"}
        ]));
        assert!(!first.is_skipped("x").unwrap());

        let mut second = group(json!([{"name": "flag", "type": "integer", "value": 0}]));
        second.push_option(first.option("x").unwrap().clone()).unwrap();

        assert_eq!(second.option("x").unwrap().group_id(), Some(second.id()));
        assert!(second.is_skipped("x").unwrap());
        assert!(!first.is_skipped("x").unwrap());
    }

    #[test]
    fn test_set_value_unknown_member() {
        let mut g = group(json!([]));
        let err = g.set_value("ghost", 1).unwrap_err();
        assert_eq!(err, OptoError::OptionNotFound("ghost".to_string()));
    }

    #[test]
    fn test_clone_gets_new_id() {
        let g = group(json!([{"name": "a", "type": "integer"}]));
        let copy = g.clone();
        assert_ne!(g.id(), copy.id());
        assert_eq!(copy[0].group_id(), Some(copy.id()));
    }

    #[test]
    fn test_push_option_takes_over_membership() {
        let mut first = group(json!([{"name": "a", "type": "integer"}]));
        let opt = first.option("a").unwrap().clone();
        let mut second = Group::empty();
        let id = second.id();
        let adopted = second.push_option(opt).unwrap();
        assert_eq!(adopted.group_id(), Some(id));
        first.set_value("a", 1).unwrap();
        assert!(second.value_of("a").unwrap().is_null());
    }
}
