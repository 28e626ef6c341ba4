/// Core error types for the sorter
use thiserror::Error;

/// Result type alias using `SorterError`
pub type Result<T> = std::result::Result<T, SorterError>;

/// Core error type shared across the sorter crates
#[derive(Error, Debug)]
pub enum SorterError {
    /// Scan root is missing or not a directory
    #[error("Invalid scan root: {0}")]
    InvalidRoot(String),

    /// Dictionary validation failures (duplicate names, protected deletions)
    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SorterError {
    /// Create an invalid-root error
    pub fn invalid_root(msg: impl Into<String>) -> Self {
        Self::InvalidRoot(msg.into())
    }

    /// Create an invalid-dictionary error
    pub fn invalid_dictionary(msg: impl Into<String>) -> Self {
        Self::InvalidDictionary(msg.into())
    }

    /// Create an invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
