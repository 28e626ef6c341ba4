//! Error types for the sorting engine

use thiserror::Error;

/// Errors that can occur during scanning, sorting, and undo operations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid root folder: {0}")]
    InvalidRoot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] sorter_core::SorterError),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
