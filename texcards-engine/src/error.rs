//! Error types for output format operations

use thiserror::Error;

/// Errors that can occur while writing cards out in some format
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not accept the requested options
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
