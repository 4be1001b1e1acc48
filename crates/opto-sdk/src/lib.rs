//! Opto SDK
//!
//! High-level API for building options and option groups from
//! declarations, either as values or YAML documents.
//!
//! ```rust,ignore
//! use opto_sdk::{Built, Opto};
//!
//! let opto = Opto::new();
//! let mut group = opto
//!     .load("- { name: count, type: integer, max: 10 }")?
//!     .into_group()?;
//! group.set_value("count", 11)?;
//! assert!(!group.is_valid());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod opto;

// Re-export main types
pub use builder::OptoBuilder;
pub use config::EngineConfig;
pub use error::{Result, SdkError};
pub use opto::{build, load, Built, Opto};

// Re-export commonly used types from dependencies
pub use opto_core::{
    Errors, Group, GroupConfig, Opt, OptoError, OutputAction, OutputHandler, Params, PluginRegistry,
    ToHashOptions, TypeDefinition, Value,
};
pub use opto_parser::LoadError;
