//! Per-user library state: favorites, watchlist and watch history.
//!
//! Each collection is stored as one JSON document under
//! `<namespace>_<collection>` in a [`StorageBackend`]. Every mutation rewrites
//! the whole document in a single backend write.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediax_core::{LibraryStore, MemoryBackend};
//!
//! let library = LibraryStore::new(MemoryBackend::new());
//! assert!(library.toggle_favorite("c1").await?);
//! assert!(library.is_favorited("c1").await);
//!
//! library.save_progress("c1", 120).await?;
//! assert_eq!(library.progress("c1").await, 120);
//! ```

mod codec;
mod store;
mod types;

pub use store::LibraryStore;
pub use types::*;

use std::sync::Arc;

use crate::config::Config;
use crate::storage::{create_backend, StorageBackend};

/// Open the library described by the configuration.
pub fn open_library(
    config: &Config,
) -> Result<LibraryStore<Arc<dyn StorageBackend>>, LibraryError> {
    let backend = create_backend(config)?;
    Ok(LibraryStore::with_namespace(backend, config.storage.namespace.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatencyConfig, StorageBackendKind};

    #[tokio::test]
    async fn test_open_library_from_config() {
        let mut config = Config::default();
        config.storage.backend = StorageBackendKind::Memory;
        config.storage.namespace = "profile2".to_string();
        config.latency = LatencyConfig::none();

        let library = open_library(&config).unwrap();
        assert_eq!(library.namespace(), "profile2");
        assert!(library.toggle_watchlist("s1").await.unwrap());

        let raw = library
            .backend()
            .read("profile2_watchlist")
            .await
            .unwrap();
        assert_eq!(raw.as_deref(), Some("[\"s1\"]"));
    }
}
