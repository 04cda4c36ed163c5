//! Mock storage backend for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{MemoryBackend, StorageBackend, StorageError};

/// A recorded backend write for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    /// Key that was written.
    pub key: String,
    /// Full document that was written.
    pub value: String,
}

/// Mock implementation of the StorageBackend trait.
///
/// Provides controllable behavior for testing:
/// - Track every write for assertions
/// - Fail the next operation with a chosen error
/// - Simulate a store that is down entirely
///
/// # Example
///
/// ```rust,ignore
/// use mediax_core::testing::MockBackend;
///
/// let backend = MockBackend::new();
/// let library = LibraryStore::new(backend.clone());
///
/// backend.set_unavailable(true).await;
/// assert!(library.toggle_favorite("c1").await.is_err());
/// assert_eq!(backend.write_count().await, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    /// Values actually stored.
    store: MemoryBackend,
    /// Recorded successful writes.
    writes: Arc<RwLock<Vec<RecordedWrite>>>,
    /// Number of reads served (successful or not).
    reads: Arc<RwLock<usize>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<StorageError>>>,
    /// If set, only writes fail.
    fail_writes: Arc<RwLock<bool>>,
    /// If set, every operation fails.
    unavailable: Arc<RwLock<bool>>,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying store, e.g. to plant raw documents.
    pub fn memory(&self) -> &MemoryBackend {
        &self.store
    }

    /// Get all recorded writes.
    pub async fn recorded_writes(&self) -> Vec<RecordedWrite> {
        self.writes.read().await.clone()
    }

    /// Get the number of successful writes.
    pub async fn write_count(&self) -> usize {
        self.writes.read().await.len()
    }

    /// Get the number of reads attempted.
    pub async fn read_count(&self) -> usize {
        *self.reads.read().await
    }

    /// Clear recorded writes and read count.
    pub async fn clear_recorded(&self) {
        self.writes.write().await.clear();
        *self.reads.write().await = 0;
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: StorageError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every write fail while reads keep working.
    pub async fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write().await = fail;
    }

    /// Make every operation fail.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }

    /// Error for the current operation, if one is configured.
    async fn take_error(&self, is_write: bool) -> Option<StorageError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(err);
        }
        if *self.unavailable.read().await {
            return Some(StorageError::Unavailable("mock backend is down".to_string()));
        }
        if is_write && *self.fail_writes.read().await {
            return Some(StorageError::Database("mock write failure".to_string()));
        }
        None
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        *self.reads.write().await += 1;
        if let Some(err) = self.take_error(false).await {
            return Err(err);
        }
        self.store.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(err) = self.take_error(true).await {
            return Err(err);
        }
        self.store.write(key, value).await?;
        self.writes.write().await.push(RecordedWrite {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if let Some(err) = self.take_error(true).await {
            return Err(err);
        }
        self.store.remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_writes() {
        let backend = MockBackend::new();
        backend.write("k", "v").await.unwrap();

        let writes = backend.recorded_writes().await;
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].key, "k");
        assert_eq!(backend.memory().raw("k").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_next_error_is_consumed() {
        let backend = MockBackend::new();
        backend
            .set_next_error(StorageError::Unavailable("boom".into()))
            .await;

        assert!(backend.read("k").await.is_err());
        assert!(backend.read("k").await.is_ok());
        assert_eq!(backend.read_count().await, 2);
    }

    #[tokio::test]
    async fn test_fail_writes_only() {
        let backend = MockBackend::new();
        backend.set_fail_writes(true).await;

        assert!(backend.read("k").await.is_ok());
        assert!(matches!(
            backend.write("k", "v").await,
            Err(StorageError::Database(_))
        ));
        assert_eq!(backend.write_count().await, 0);
    }
}
