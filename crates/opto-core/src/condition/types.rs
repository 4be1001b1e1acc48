//! Condition types for `if` / `unless` specifications

use super::ValueSource;
use crate::types::boolean::truthy;
use crate::types::Value;
use std::cmp::Ordering;

static NULL: Value = Value::Null;

/// Comparison operators accepted inside an operator mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    /// Less than (lt)
    Lt,
    /// Less than or equal (lte)
    Lte,
    /// Greater than (gt)
    Gt,
    /// Greater than or equal (gte)
    Gte,
    /// Equal (eq)
    Eq,
    /// Not equal (ne)
    Ne,
    /// String prefix (start_with)
    StartWith,
    /// String suffix (end_with)
    EndWith,
    /// Sequence member or substring (contain)
    Contain,
    /// Member of a list (any_of). A comma-separated string operand is
    /// matched against the sibling's display string, so `2` matches `"1,2,3"`.
    AnyOf,
}

impl ConditionOperator {
    pub fn from_key(key: &str) -> Option<Self> {
        let op = match key {
            "lt" => ConditionOperator::Lt,
            "lte" => ConditionOperator::Lte,
            "gt" => ConditionOperator::Gt,
            "gte" => ConditionOperator::Gte,
            "eq" => ConditionOperator::Eq,
            "ne" => ConditionOperator::Ne,
            "start_with" => ConditionOperator::StartWith,
            "end_with" => ConditionOperator::EndWith,
            "contain" => ConditionOperator::Contain,
            "any_of" => ConditionOperator::AnyOf,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            ConditionOperator::Lt => "lt",
            ConditionOperator::Lte => "lte",
            ConditionOperator::Gt => "gt",
            ConditionOperator::Gte => "gte",
            ConditionOperator::Eq => "eq",
            ConditionOperator::Ne => "ne",
            ConditionOperator::StartWith => "start_with",
            ConditionOperator::EndWith => "end_with",
            ConditionOperator::Contain => "contain",
            ConditionOperator::AnyOf => "any_of",
        }
    }

    /// Apply the operator with the sibling value on the left.
    pub fn apply(&self, value: &Value, operand: &Value) -> bool {
        match self {
            ConditionOperator::Lt => value.partial_cmp_value(operand) == Some(Ordering::Less),
            ConditionOperator::Lte => matches!(
                value.partial_cmp_value(operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            ConditionOperator::Gt => value.partial_cmp_value(operand) == Some(Ordering::Greater),
            ConditionOperator::Gte => matches!(
                value.partial_cmp_value(operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            ConditionOperator::Eq => value == operand,
            ConditionOperator::Ne => value != operand,
            ConditionOperator::StartWith => value
                .to_display_string()
                .starts_with(&operand.to_display_string()),
            ConditionOperator::EndWith => value
                .to_display_string()
                .ends_with(&operand.to_display_string()),
            ConditionOperator::Contain => match value {
                Value::Array(items) => items.contains(operand),
                other => other
                    .to_display_string()
                    .contains(&operand.to_display_string()),
            },
            ConditionOperator::AnyOf => match operand {
                Value::Array(members) => members.contains(value),
                Value::String(list) => {
                    let value = value.to_display_string();
                    list.split(',').any(|member| member == value)
                }
                _ => false,
            },
        }
    }
}

/// What a mapping-form specification requires of one sibling
#[derive(Debug, Clone, PartialEq)]
pub enum SiblingCondition {
    /// `sibling: literal`
    Equals(Value),
    /// `sibling: { op: operand, ... }`, in declaration order
    Operators(Vec<(ConditionOperator, Value)>),
}

/// A parsed `if` / `unless` specification
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionSpec {
    /// No specification
    Empty,
    /// A single sibling name
    Name(String),
    /// A list of sibling names
    Names(Vec<String>),
    /// Sibling name to literal or operator mapping
    Map(Vec<(String, SiblingCondition)>),
}

/// The check a predicate applies to its sibling's value
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateTest {
    Truthy,
    Compare(ConditionOperator, Value),
}

/// One boolean check against one sibling
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sibling: String,
    pub test: PredicateTest,
}

impl Predicate {
    pub fn truthy(sibling: impl Into<String>) -> Self {
        Self {
            sibling: sibling.into(),
            test: PredicateTest::Truthy,
        }
    }

    pub fn compare(sibling: impl Into<String>, operator: ConditionOperator, operand: Value) -> Self {
        Self {
            sibling: sibling.into(),
            test: PredicateTest::Compare(operator, operand),
        }
    }

    /// A missing sibling behaves like an absent value.
    pub fn evaluate(&self, source: &dyn ValueSource) -> bool {
        let value = source.value_of(&self.sibling).unwrap_or(&NULL);
        match &self.test {
            PredicateTest::Truthy => truthy(value),
            PredicateTest::Compare(op, operand) => op.apply(value, operand),
        }
    }
}
