//! Memory-only backend used when no file or database is configured.

use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::domain::entities::Snapshot;
use crate::domain::error::{StorageError, StorageResult};
use crate::domain::repositories::LinkBackend;

/// A backend that keeps nothing across restarts.
///
/// It still tracks which short ids were persisted so that concurrent
/// creations of the same id are rejected with
/// [`StorageError::Duplicate`], the same way the relational backend rejects
/// them.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    taken: Mutex<HashSet<String>>,
}

impl MemoryBackend {
    /// Creates a new MemoryBackend instance.
    pub fn new() -> Self {
        debug!("Using MemoryBackend (no durability)");
        Self::default()
    }

    /// Number of short ids persisted so far.
    pub fn len(&self) -> usize {
        self.taken.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.lock().is_empty()
    }
}

#[async_trait]
impl LinkBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> StorageResult<Snapshot> {
        Ok(Snapshot::default())
    }

    async fn persist(&self, _person: &str, short_id: &str, _long_url: &str) -> StorageResult<()> {
        if !self.taken.lock().insert(short_id.to_string()) {
            return Err(StorageError::duplicate(short_id));
        }
        Ok(())
    }

    async fn mark_deleted(&self, _person: &str, _short_id: &str) -> StorageResult<()> {
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_is_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persist_rejects_taken_id() {
        let backend = MemoryBackend::new();

        backend
            .persist("p1", "abc", "https://example.com")
            .await
            .unwrap();
        let second = backend.persist("p2", "abc", "https://example.com").await;

        assert_eq!(second, Err(StorageError::duplicate("abc")));
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn test_always_healthy() {
        let backend = MemoryBackend::new();
        assert!(backend.is_healthy().await);
        assert!(backend.mark_deleted("p1", "missing").await.is_ok());
    }
}
