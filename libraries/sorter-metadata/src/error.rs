/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Reasons a binary read stops early.
///
/// These never cross the crate boundary as failures; the dispatcher logs
/// them and returns the partially collected metadata.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The file does not start with the expected magic bytes
    #[error("bad magic for {0}")]
    BadMagic(&'static str),

    /// The buffer ended inside a structure
    #[error("truncated {0}")]
    Truncated(&'static str),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
