//! Persistence backend trait for link storage.

use crate::domain::entities::Snapshot;
use crate::domain::error::StorageResult;
use async_trait::async_trait;

/// Durable store behind the in-memory index.
///
/// The backend is the source of truth: the index is rebuilt from
/// [`LinkBackend::load`] on every start.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryBackend`] - No durability
/// - [`crate::infrastructure::persistence::FileBackend`] - JSON file snapshot
/// - [`crate::infrastructure::persistence::PgBackend`] - PostgreSQL `links` table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkBackend: Send + Sync {
    /// Short backend name used in logs and health reports.
    fn name(&self) -> &'static str;

    /// Reads every stored link, active and soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::StorageError::BackendUnavailable`] on IO or
    /// connection failures and [`crate::domain::StorageError::InvalidData`]
    /// if stored data cannot be decoded.
    async fn load(&self) -> StorageResult<Snapshot>;

    /// Stores a new active link.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::StorageError::Duplicate`] if the short id is
    /// already taken, active or deleted.
    ///
    /// Returns [`crate::domain::StorageError::BackendUnavailable`] on IO or
    /// connection failures.
    async fn persist(&self, person: &str, short_id: &str, long_url: &str) -> StorageResult<()>;

    /// Marks a link owned by `person` as deleted.
    ///
    /// Marking an unknown or already deleted link is not an error.
    async fn mark_deleted(&self, person: &str, short_id: &str) -> StorageResult<()>;

    /// Checks whether the backend can currently serve requests.
    async fn is_healthy(&self) -> bool;
}
