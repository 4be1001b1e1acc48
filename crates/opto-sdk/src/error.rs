//! SDK error types

use thiserror::Error;

/// SDK error type
///
/// Core and loader errors keep their own messages.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Declaration, type or condition error
    #[error(transparent)]
    Option(#[from] opto_core::OptoError),

    /// Document loading error
    #[error(transparent)]
    Load(#[from] opto_parser::LoadError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A group was expected but a single option was built, or the reverse
    #[error("Expected {expected}, built {actual}")]
    UnexpectedShape {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
