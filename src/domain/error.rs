//! Storage error taxonomy shared by the index, the backends and the facade.

use thiserror::Error;

/// Errors surfaced by the storage layer.
///
/// HTTP handlers translate these into [`crate::error::AppError`]; the
/// `Duplicate` variant carries the colliding short id so callers can still
/// answer with a usable short URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The long URL was rejected before any storage interaction.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No active or deleted record exists for the short id.
    #[error("short id '{0}' not found")]
    NotFound(String),

    /// The short id resolves to a soft-deleted record.
    #[error("short id '{0}' has been deleted")]
    Gone(String),

    /// A uniqueness conflict on the short id.
    #[error("short id '{short_id}' already exists")]
    Duplicate { short_id: String },

    /// Connection or IO failure talking to the backend.
    #[error("storage backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Persisted data could not be decoded.
    #[error("invalid stored data: {0}")]
    InvalidData(String),
}

impl StorageError {
    pub fn duplicate(short_id: impl Into<String>) -> Self {
        Self::Duplicate {
            short_id: short_id.into(),
        }
    }
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
