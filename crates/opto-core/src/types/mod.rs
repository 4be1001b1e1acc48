//! Type system for option values
//!
//! This module contains:
//! - Value types
//! - Type definitions (defaults, sanitizer, validators)
//! - The plugin registry that resolves type and output names
//! - The built-in `integer`, `string` and `boolean` types

pub mod boolean;
pub mod definition;
pub mod integer;
pub mod registry;
pub mod string;
pub mod value;

pub use definition::{param_f64, param_flag, Errors, Params, Sanitizer, TypeDefinition, ValidatorFn};
pub use registry::PluginRegistry;
pub use value::Value;
