//! Row error types.

use thiserror::Error;

/// Errors surfaced by the row runtime and its configuration layer.
///
/// Row interactions themselves never fail; these cover the host-facing
/// surface (unknown rows, bad configuration, view export).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// No mounted row under this key
    #[error("Row {key} is not mounted")]
    RowNotMounted { key: u64 },

    /// Configuration could not be read or failed validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for row operations.
pub type Result<T> = std::result::Result<T, RowError>;
