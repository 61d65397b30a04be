//! Persistence backend implementations.
//!
//! # Backends
//!
//! - [`MemoryBackend`] - No durability, used when nothing is configured
//! - [`FileBackend`] - JSON file snapshot
//! - [`PgBackend`] - PostgreSQL `links` table
//!
//! Exactly one is chosen at startup through [`BackendConfig`].

pub mod file_backend;
pub mod memory_backend;
pub mod pg_backend;

pub use file_backend::FileBackend;
pub use memory_backend::MemoryBackend;
pub use pg_backend::PgBackend;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use crate::domain::error::StorageResult;
use crate::domain::repositories::LinkBackend;

/// Backend variant selected once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Postgres {
        dsn: String,
        max_connections: u32,
        connect_timeout: Duration,
    },
    File {
        path: PathBuf,
    },
    Memory,
}

impl BackendConfig {
    /// Human-readable variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres { .. } => "postgres",
            Self::File { .. } => "file",
            Self::Memory => "memory",
        }
    }

    /// Opens the configured backend.
    ///
    /// # Errors
    ///
    /// Fails if the file is unreadable or malformed, or if the database DSN
    /// is invalid or migrations cannot be applied. The caller treats this as
    /// fatal.
    pub async fn open(&self) -> StorageResult<Arc<dyn LinkBackend>> {
        let backend: Arc<dyn LinkBackend> = match self {
            Self::Postgres {
                dsn,
                max_connections,
                connect_timeout,
            } => {
                let options = PgPoolOptions::new()
                    .max_connections(*max_connections)
                    .acquire_timeout(*connect_timeout);
                Arc::new(PgBackend::connect(dsn, options).await?)
            }
            Self::File { path } => Arc::new(FileBackend::open(path.clone()).await?),
            Self::Memory => Arc::new(MemoryBackend::new()),
        };

        Ok(backend)
    }
}
