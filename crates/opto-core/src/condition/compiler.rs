//! Condition specification parser and predicate compiler
//!
//! Turns specifications like:
//! - `enabled`
//! - `[enabled, ready]`
//! - `{ mode: production }`
//! - `{ age: { gte: 18 } }`
//!
//! into a flat list of predicates.

use super::types::{ConditionOperator, ConditionSpec, Predicate, SiblingCondition};
use super::ValueSource;
use crate::declaration::normalize_key;
use crate::error::{OptoError, Result};
use crate::types::Value;

impl ConditionSpec {
    /// Parse a specification value
    pub fn parse(spec: &Value) -> Result<Self> {
        match spec {
            Value::Null => Ok(ConditionSpec::Empty),
            Value::String(name) => Ok(ConditionSpec::Name(normalize_key(name))),
            Value::Array(items) => {
                let names = items
                    .iter()
                    .map(|item| match item {
                        Value::String(name) => Ok(normalize_key(name)),
                        other => Err(OptoError::InvalidCondition(format!(
                            "expected a sibling name, got {}",
                            other.type_name()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ConditionSpec::Names(names))
            }
            Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (sibling, condition) in map {
                    let condition = match condition {
                        Value::Object(ops) => {
                            SiblingCondition::Operators(parse_operators(sibling, ops)?)
                        }
                        literal => SiblingCondition::Equals(literal.clone()),
                    };
                    entries.push((normalize_key(sibling), condition));
                }
                Ok(ConditionSpec::Map(entries))
            }
            other => Err(OptoError::InvalidCondition(format!(
                "invalid syntax for conditional: {}",
                other.type_name()
            ))),
        }
    }

    /// Flatten into predicates
    pub fn predicates(&self) -> Vec<Predicate> {
        match self {
            ConditionSpec::Empty => Vec::new(),
            ConditionSpec::Name(name) => vec![Predicate::truthy(name.clone())],
            ConditionSpec::Names(names) => names.iter().cloned().map(Predicate::truthy).collect(),
            ConditionSpec::Map(entries) => entries
                .iter()
                .flat_map(|(sibling, condition)| match condition {
                    SiblingCondition::Equals(literal) => {
                        vec![Predicate::compare(sibling.clone(), ConditionOperator::Eq, literal.clone())]
                    }
                    SiblingCondition::Operators(ops) => ops
                        .iter()
                        .map(|(op, operand)| Predicate::compare(sibling.clone(), *op, operand.clone()))
                        .collect(),
                })
                .collect(),
        }
    }
}

fn parse_operators(
    sibling: &str,
    ops: &indexmap::IndexMap<String, Value>,
) -> Result<Vec<(ConditionOperator, Value)>> {
    ops.iter()
        .map(|(key, operand)| {
            let op = ConditionOperator::from_key(&normalize_key(key)).ok_or_else(|| {
                OptoError::InvalidCondition(format!(
                    "unknown operator '{}' for '{}'",
                    key, sibling
                ))
            })?;
            if op == ConditionOperator::AnyOf
                && !matches!(operand, Value::Array(_) | Value::String(_))
            {
                return Err(OptoError::InvalidCondition(
                    "Invalid list for 'any_of'. Expected: Array or a comma separated string"
                        .to_string(),
                ));
            }
            Ok((op, operand.clone()))
        })
        .collect()
}

/// Parse and flatten a specification value into predicates
pub fn compile(spec: &Value) -> Result<Vec<Predicate>> {
    let predicates = ConditionSpec::parse(spec)?.predicates();
    log::trace!("compiled {} condition predicate(s)", predicates.len());
    Ok(predicates)
}

/// True when at least one predicate holds; false for an empty specification
pub fn any_true(spec: &Value, source: &dyn ValueSource) -> Result<bool> {
    Ok(compile(spec)?.iter().any(|p| p.evaluate(source)))
}

/// True when every predicate holds; true for an empty specification
pub fn all_true(spec: &Value, source: &dyn ValueSource) -> Result<bool> {
    Ok(compile(spec)?.iter().all(|p| p.evaluate(source)))
}
