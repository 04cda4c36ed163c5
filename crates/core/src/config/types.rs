use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Where favorites, watchlist and history are persisted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// SQLite database file (ignored by the memory backend).
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Prefix for the persisted collection keys (`<namespace>_favorites`, ...).
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            path: default_storage_path(),
            namespace: default_namespace(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("mediax.db")
}

fn default_namespace() -> String {
    "mediax".to_string()
}

/// Available storage backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackendKind {
    #[default]
    Sqlite,
    Memory,
}

/// Artificial delay applied in front of the storage backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LatencyConfig {
    /// Delay before each read, in milliseconds.
    #[serde(default = "default_read_ms")]
    pub read_ms: u64,
    /// Delay before each write, in milliseconds.
    #[serde(default = "default_write_ms")]
    pub write_ms: u64,
}

impl LatencyConfig {
    /// No delay at all. What tests want.
    pub fn none() -> Self {
        Self {
            read_ms: 0,
            write_ms: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.read_ms == 0 && self.write_ms == 0
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            read_ms: default_read_ms(),
            write_ms: default_write_ms(),
        }
    }
}

fn default_read_ms() -> u64 {
    50
}

fn default_write_ms() -> u64 {
    200
}

/// Catalog source and browsing limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON catalog file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    /// Records revealed per "load more" step.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Maximum quick-search results.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    /// Items considered for the "similar content" strip.
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            page_size: default_page_size(),
            search_limit: default_search_limit(),
            similar_limit: default_similar_limit(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/sample_contents.json")
}

fn default_page_size() -> usize {
    8
}

fn default_search_limit() -> usize {
    20
}

fn default_similar_limit() -> usize {
    6
}
