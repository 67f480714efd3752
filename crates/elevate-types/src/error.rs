//! Error types for model manipulation in elevate-types.

use thiserror::Error;

/// Errors raised while reading or patching settings documents.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The patch names a field the document does not have.
    #[error("Unknown settings field: {0}")]
    UnknownField(String),

    /// The patch tries to change a field that identifies the document.
    #[error("Settings field '{0}' cannot be changed")]
    ReadOnlyField(String),

    /// The value does not fit the field it was assigned to.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// Unknown zone type key.
    #[error("Unknown zone type: {0}")]
    UnknownZoneType(String),

    /// Unknown environment target name.
    #[error("Unknown environment target: {0}")]
    UnknownEnvTarget(String),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// Create an invalid value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using elevate-types' ModelError type.
pub type ModelResult<T> = std::result::Result<T, ModelError>;
