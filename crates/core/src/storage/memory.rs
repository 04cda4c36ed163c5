//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StorageBackend, StorageError};

/// Volatile backend holding values in a shared map.
///
/// Clones share the same map, so a second store attached to a clone sees
/// everything the first one wrote. Used for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing any serialization (e.g. to plant corrupt data).
    pub async fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    /// Raw value for `key`, as last written.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key() {
        let backend = MemoryBackend::new();
        let value = tokio_test::block_on(backend.read("nothing")).unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_value() {
        let backend = MemoryBackend::new();
        backend.write("mediax_favorites", "[\"a\"]").await.unwrap();
        backend.write("mediax_favorites", "[\"b\"]").await.unwrap();

        assert_eq!(backend.raw("mediax_favorites").await.as_deref(), Some("[\"b\"]"));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let backend = MemoryBackend::new();
        let attached = backend.clone();

        backend.write("k", "v").await.unwrap();
        assert_eq!(attached.read("k").await.unwrap().as_deref(), Some("v"));

        attached.remove("k").await.unwrap();
        assert!(backend.is_empty().await);
    }
}
