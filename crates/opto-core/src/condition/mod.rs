//! Condition Module
//!
//! Compiles the declarative `if` / `unless` specifications of an option
//! into predicates over the values of its siblings.
//!
//! # Syntax
//!
//! ## Name references
//! ```yaml
//! if: enabled            # sibling "enabled" is truthy
//! if: [enabled, ready]   # one truthy check per name
//! ```
//!
//! ## Literal equality
//! ```yaml
//! if:
//!   mode: production
//! ```
//!
//! ## Operators
//! ```yaml
//! if:
//!   age: { gte: 18, lt: 65 }
//!   region: { any_of: "eu,us" }
//! ```
//!
//! ## Supported Operators
//! - `lt`, `lte`, `gt`, `gte` (ordering; numbers with numbers, strings with strings)
//! - `eq`, `ne` (equality)
//! - `start_with`, `end_with` (on the string form of the value)
//! - `contain` (sequence membership, otherwise substring)
//! - `any_of` (membership in a sequence or a comma separated string)
//!
//! Specifications are parsed when evaluated, so a malformed one surfaces as
//! `OptoError::InvalidCondition` on first use rather than at declaration.

mod compiler;
mod types;

pub use compiler::{all_true, any_true, compile};
pub use types::{ConditionOperator, ConditionSpec, Predicate, PredicateTest, SiblingCondition};

use crate::types::Value;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Something that can report the sanitized value of a sibling by name
pub trait ValueSource {
    /// `None` when there is no sibling with that name
    fn value_of(&self, name: &str) -> Option<&Value>;
}

impl ValueSource for HashMap<String, Value> {
    fn value_of(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl ValueSource for IndexMap<String, Value> {
    fn value_of(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}
