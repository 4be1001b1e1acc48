//! Opto Parser - YAML loading for option declarations
//!
//! Reads a YAML document (a mapping or a sequence of mappings) into an
//! `opto_core::Value`, optionally selecting a top-level key, ready to be
//! handed to the option / group constructors.

pub mod error;
pub mod yaml_loader;

// Re-export main loader types
pub use error::{LoadError, Result};
pub use yaml_loader::{yaml_to_value, YamlLoader};
