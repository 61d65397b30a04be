//! Storage facade: short id derivation, index and backend orchestration.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};

use crate::domain::delete_event::DeleteEvent;
use crate::domain::error::{StorageError, StorageResult};
use crate::domain::index::{LinkIndex, Lookup};
use crate::domain::repositories::LinkBackend;
use crate::utils::short_id;
use crate::utils::url_validator::validate_long_url;

/// Service resolving, creating and soft-deleting short links.
///
/// The backend is the source of truth; the index is rebuilt from it on
/// [`LinkService::open`] and updated only after the backend accepted a write.
pub struct LinkService<B: LinkBackend + ?Sized> {
    backend: Arc<B>,
    index: LinkIndex,
    delete_tx: mpsc::Sender<DeleteEvent>,
}

impl<B: LinkBackend + ?Sized> LinkService<B> {
    /// Creates a service with an empty index.
    pub fn new(backend: Arc<B>, delete_tx: mpsc::Sender<DeleteEvent>) -> Self {
        Self {
            backend,
            index: LinkIndex::new(),
            delete_tx,
        }
    }

    /// Creates a service and fills the index from the backend snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the backend error. The server refuses to start on it.
    pub async fn open(
        backend: Arc<B>,
        delete_tx: mpsc::Sender<DeleteEvent>,
    ) -> StorageResult<Self> {
        let index = LinkIndex::from_snapshot(backend.load().await?);

        info!(
            backend = backend.name(),
            active = index.active_len(),
            deleted = index.deleted_len(),
            "Link index restored"
        );

        Ok(Self {
            backend,
            index,
            delete_tx,
        })
    }

    /// Derives the short id for `long_url`.
    pub fn compute_id(&self, long_url: &str) -> String {
        short_id::compute_id(long_url)
    }

    /// Resolves a short id to its long URL.
    ///
    /// With `person` set, only that person's links are considered.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Gone`] if the link was soft-deleted
    /// - [`StorageError::NotFound`] if it never existed
    pub fn resolve(&self, person: Option<&str>, short_id: &str) -> StorageResult<String> {
        match self.index.read(person, short_id) {
            Lookup::Active(long_url) => Ok(long_url),
            Lookup::Deleted(_) => Err(StorageError::Gone(short_id.to_string())),
            Lookup::Absent => Err(StorageError::NotFound(short_id.to_string())),
        }
    }

    /// Returns the short id for `long_url`, creating the link if needed.
    ///
    /// Re-submitting a URL that is already active returns its id without a
    /// write, whoever created it.
    ///
    /// # Errors
    ///
    /// - [`StorageError::InvalidInput`] if the URL is too long or malformed
    /// - [`StorageError::Duplicate`] if the id is taken by another URL, by a
    ///   soft-deleted link, or by a concurrent writer
    /// - [`StorageError::BackendUnavailable`] if the backend write failed
    pub async fn shorten_or_reuse(
        &self,
        person: &str,
        long_url: &str,
    ) -> StorageResult<String> {
        validate_long_url(long_url)?;

        let short_id = self.compute_id(long_url);

        match self.index.read(None, &short_id) {
            Lookup::Active(existing) if existing == long_url => {
                debug!(short_id = %short_id, "Reusing existing link");
                metrics::counter!("links_reused_total").increment(1);
                return Ok(short_id);
            }
            Lookup::Active(_) | Lookup::Deleted(_) => {
                return Err(StorageError::duplicate(short_id));
            }
            Lookup::Absent => {}
        }

        if let Err(e) = self.backend.persist(person, &short_id, long_url).await {
            if !matches!(e, StorageError::Duplicate { .. }) {
                warn!(short_id = %short_id, error = %e, "Failed to persist link");
            }
            return Err(e);
        }

        self.index.write(person, &short_id, long_url);
        metrics::counter!("links_created_total").increment(1);
        debug!(short_id = %short_id, "Link created");

        Ok(short_id)
    }

    /// Active links owned by `person`, keyed by short id.
    pub fn list_active(&self, person: &str) -> BTreeMap<String, String> {
        self.index.list(person)
    }

    /// Soft-deletes a link owned by `person`.
    ///
    /// The index changes immediately; the backend is updated by the delete
    /// worker. Mirroring failures are not reported here.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if `person` has no active link with
    /// this id.
    pub fn soft_delete(&self, person: &str, short_id: &str) -> StorageResult<()> {
        if !self.index.soft_delete(person, short_id) {
            return Err(StorageError::NotFound(short_id.to_string()));
        }

        match self.delete_tx.try_send(DeleteEvent::new(person, short_id)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("link_deletes_dropped_total").increment(1);
                warn!(short_id = %event.short_id, "Delete queue full, backend not updated");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("link_deletes_dropped_total").increment(1);
                warn!(short_id = %event.short_id, "Delete queue closed, backend not updated");
            }
        }

        Ok(())
    }

    /// Whether the backend is reachable.
    pub async fn health_check(&self) -> bool {
        self.backend.is_healthy().await
    }

    /// Name of the configured backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Free slots left in the delete queue.
    pub fn delete_queue_capacity(&self) -> usize {
        self.delete_tx.capacity()
    }

    /// Whether the delete worker is still receiving events.
    pub fn delete_queue_open(&self) -> bool {
        !self.delete_tx.is_closed()
    }
}
