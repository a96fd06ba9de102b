//! Error types for JEDEC file operations

use std::path::PathBuf;

use jedec_core::JedecError;
use thiserror::Error;

/// Errors returned by the file-level read and write entry points
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened or created
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the file contents failed
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the file contents failed
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is outside the accepted size range
    ///
    /// For streams cut off at `max + 1` bytes, `size` is a lower bound.
    #[error("invalid file size: {size} bytes, expected {min}..={max}")]
    Size { size: u64, min: u64, max: u64 },

    /// The contents are not a well-formed JEDEC file
    #[error("bad JEDEC file format")]
    BadFormat,

    /// The fuse map or output buffer could not be allocated
    #[error("out of memory")]
    MemoryExhausted,

    /// Encoding a summary as JSON failed
    #[cfg(feature = "serde")]
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<JedecError> for Error {
    fn from(err: JedecError) -> Self {
        match err {
            JedecError::BadFormat => Error::BadFormat,
            JedecError::MemoryExhausted => Error::MemoryExhausted,
        }
    }
}

/// Result type for JEDEC file operations
pub type Result<T> = std::result::Result<T, Error>;
