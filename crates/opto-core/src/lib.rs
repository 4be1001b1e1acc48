//! Opto Core - schema-driven option definitions
//!
//! This crate provides the building blocks of the Opto option engine:
//! - Value types for raw and sanitized option values
//! - The plugin registry (option types with their defaults, sanitizer and
//!   validators, plus output handlers)
//! - Options and option groups
//! - The conditional grammar used by `if` / `unless`
//! - Error types

pub mod condition;
pub mod declaration;
pub mod error;
pub mod group;
pub mod option;
pub mod output;
pub mod types;

// Re-export commonly used types
pub use error::{OptoError, Result};
pub use group::{Group, GroupConfig, GroupId, ToHashOptions};
pub use option::Opt;
pub use output::{OutputAction, OutputHandler};
pub use types::{Errors, Params, PluginRegistry, TypeDefinition, Value};
