//! Domain layer containing storage entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`error`] - Storage error taxonomy
//! - [`index`] - Concurrency-safe in-memory index
//! - [`repositories`] - Backend trait definition
//! - [`delete_event`] - Soft-delete event model
//! - [`delete_worker`] - Asynchronous soft-delete mirroring worker
//!
//! # Soft Delete Flow
//!
//! 1. The facade moves the link from the active to the deleted map of the index
//! 2. A [`delete_event::DeleteEvent`] is sent to a bounded channel
//! 3. [`delete_worker::run_delete_worker`] mirrors it with retry logic
//! 4. The backend marks the record deleted via [`repositories::LinkBackend`]

pub mod delete_event;
pub mod delete_worker;
pub mod entities;
pub mod error;
pub mod index;
pub mod repositories;

pub use error::{StorageError, StorageResult};
