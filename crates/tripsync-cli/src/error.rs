use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] tripsync_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Item id cannot be empty")]
    EmptyItemId,
    #[error("Item not found in section '{0}': {1}")]
    ItemNotFound(String, String),
    #[error("Nothing to change; pass at least one field flag (see `tripsync edit --help`)")]
    EmptyEdit,
    #[error("Configuration error: {0}")]
    Config(String),
}
