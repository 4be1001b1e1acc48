//! Loader error types

use thiserror::Error;

/// Loader error
///
/// YAML and I/O failures are passed through unchanged.
#[derive(Error, Debug)]
pub enum LoadError {
    /// YAML parsing error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Reading the byte source failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The requested top-level key is not in the document
    #[error("Missing top-level key: {0}")]
    MissingKey(String),

    /// A key was requested but the document root is not a mapping
    #[error("Cannot select key '{key}': document root is {actual}")]
    NotAMapping { key: String, actual: String },
}

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoadError>;
