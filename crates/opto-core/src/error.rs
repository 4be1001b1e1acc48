//! Error types for Opto Core
//!
//! Only structural problems are errors. A value that fails validation is
//! reported through `Opt::errors`, never through `OptoError`.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptoError {
    #[error("Invalid declaration: {0}")]
    InvalidDeclaration(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Option not found: {0}")]
    OptionNotFound(String),

    #[error("Duplicate option name: {0}")]
    DuplicateName(String),
}

pub type Result<T> = std::result::Result<T, OptoError>;
