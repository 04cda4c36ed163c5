//! Types for the library store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::ContentId;
use crate::storage::StorageError;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "mediax";

/// The three persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Favorites,
    Watchlist,
    History,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Favorites => "favorites",
            Collection::Watchlist => "watchlist",
            Collection::History => "history",
        }
    }

    /// Backend key holding this collection, e.g. `mediax_favorites`.
    pub fn storage_key(&self, namespace: &str) -> String {
        format!("{}_{}", namespace, self.as_str())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last known playback position of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: ContentId,
    /// Position in whole seconds.
    pub position: u64,
    /// Unix timestamp of the last save, in milliseconds.
    pub updated: i64,
}

impl ProgressRecord {
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.updated)
    }
}

/// Full export of a library, suitable for backup or moving between backends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    #[serde(default)]
    pub favorites: Vec<ContentId>,
    #[serde(default)]
    pub watchlist: Vec<ContentId>,
    #[serde(default)]
    pub history: Vec<ProgressRecord>,
}

/// Errors for library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A required argument was empty or missing. Never retry.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The backing store could not be read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),

    /// A collection could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LibraryError {
    /// Whether the caller may retry.
    ///
    /// Toggles flip state, so a retry should go through `set_favorite` or
    /// `set_watchlist` with the desired state rather than replaying the toggle.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::StorageUnavailable(e) => e.is_retryable(),
            Self::InvalidArgument(_) | Self::Serialization(_) => false,
        }
    }
}
