//! Error types for the storage module.

use thiserror::Error;

/// Errors raised when the durable store cannot be used.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store cannot be opened or reached at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A read or write was rejected by the database.
    #[error("Database error: {0}")]
    Database(String),

    /// A shared lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    /// Whether retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Database(_))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}
