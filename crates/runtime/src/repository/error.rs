//! Error types raised by repository implementations.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("log already exists: {0}")]
    LogAlreadyExists(String),

    #[error("unsupported record schema {found} (expected {expected})")]
    UnsupportedSchema { found: u16, expected: u16 },

    #[error("partial write detected at offset {offset}: expected {expected} bytes, found {actual}")]
    PartialWrite {
        offset: u64,
        expected: usize,
        actual: usize,
    },
}

impl From<bincode::Error> for RepositoryError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
