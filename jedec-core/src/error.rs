//! Error types for JEDEC parsing and serialization

/// Errors that can occur while parsing or serializing a JEDEC fuse map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JedecError {
    /// Structural or grammar violation: framing, token order, duplicate
    /// tokens, invalid digits or invalid fuse characters
    BadFormat,
    /// Allocating the fuse map or the output buffer failed
    MemoryExhausted,
}

impl core::fmt::Display for JedecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            JedecError::BadFormat => "Bad JEDEC file format",
            JedecError::MemoryExhausted => "Out of memory",
        };
        write!(f, "{msg}")
    }
}

/// Result type for JEDEC operations
pub type Result<T> = core::result::Result<T, JedecError>;
