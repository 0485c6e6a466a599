//! Error types for the converter

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can surface from a conversion.
///
/// Per-node problems (zero-area boxes, unparseable colors, missing fonts)
/// never show up here; they degrade to omission or a default value.
#[derive(Error, Debug)]
pub enum Error {
    /// Writing the archive container failed
    #[error("Packaging failed: {0}")]
    Packaging(String),

    /// A record could not be serialized to JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while reading input or writing the archive
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The render snapshot handed to us is malformed
    #[error("Invalid render snapshot: {0}")]
    Snapshot(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Packaging(err.to_string())
    }
}
