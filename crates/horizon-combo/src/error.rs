//! Error types for combo configuration.
//!
//! The controller's transitions are total and never fail. Only loading and
//! validating a [`ComboConfig`](crate::ComboConfig) can produce an error.

use std::path::PathBuf;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ComboError>;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ComboError {
    /// File I/O error.
    #[error("Failed to read combo configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("Combo configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Combo configuration serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value the controller cannot use.
    #[error("Invalid value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },
}

impl ComboError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a validation error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
