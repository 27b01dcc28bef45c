//! Error types for tripsync-core

use thiserror::Error;

/// Result type alias using tripsync-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tripsync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote store error, already classified for display
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),

    /// Section lookup failed
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
