//! Error types for elevate-store.

use std::path::PathBuf;

use elevate_types::{EnvTarget, ModelError};

/// Result type for elevate-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in elevate-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No settings document is stored.
    #[error("No user settings stored")]
    NotFound,

    /// A settings document already exists and overwriting was not requested.
    #[error("User settings already exist (target: {0})")]
    AlreadyExists(EnvTarget),

    /// The patch does not fit the stored document.
    #[error("Invalid settings update: {0}")]
    Patch(#[from] ModelError),

    /// Invalid timestamp.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
