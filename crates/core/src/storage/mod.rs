//! Durable key-value storage behind the library.
//!
//! The library persists each collection as one JSON document under one key.
//! Backends only move opaque strings; they never interpret the documents.
//!
//! ```text
//! LibraryStore ──> LatencyBackend (optional) ──> SqliteBackend | MemoryBackend
//! ```

mod error;
mod latency;
mod memory;
mod sqlite;
mod traits;

pub use error::StorageError;
pub use latency::LatencyBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use traits::StorageBackend;

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, StorageBackendKind};

/// Build the backend stack described by the configuration.
///
/// The latency decorator is only added when a non-zero delay is configured.
pub fn create_backend(config: &Config) -> Result<Arc<dyn StorageBackend>, StorageError> {
    let base: Arc<dyn StorageBackend> = match config.storage.backend {
        StorageBackendKind::Sqlite => Arc::new(SqliteBackend::new(&config.storage.path)?),
        StorageBackendKind::Memory => Arc::new(MemoryBackend::new()),
    };

    if config.latency.is_zero() {
        info!("Using {} storage backend", base.name());
        return Ok(base);
    }

    info!(
        "Using {} storage backend with {}ms read / {}ms write latency",
        base.name(),
        config.latency.read_ms,
        config.latency.write_ms
    );
    Ok(Arc::new(LatencyBackend::new(base, &config.latency)))
}
