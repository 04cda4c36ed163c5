//! Artificial latency in front of another backend.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use super::{StorageBackend, StorageError};
use crate::config::LatencyConfig;

/// Decorator that sleeps before delegating each call.
///
/// Mimics a remote store so the presentation layer can exercise its pending
/// states. `remove` is charged the write delay.
#[derive(Debug)]
pub struct LatencyBackend<B> {
    inner: B,
    read_delay: Duration,
    write_delay: Duration,
}

impl<B: StorageBackend> LatencyBackend<B> {
    pub fn new(inner: B, config: &LatencyConfig) -> Self {
        Self {
            inner,
            read_delay: Duration::from_millis(config.read_ms),
            write_delay: Duration::from_millis(config.write_ms),
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

#[async_trait]
impl<B: StorageBackend> StorageBackend for LatencyBackend<B> {
    fn name(&self) -> &str {
        "latency"
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::pause(self.read_delay).await;
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::pause(self.write_delay).await;
        self.inner.write(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::pause(self.write_delay).await;
        self.inner.remove(key).await
    }
}
