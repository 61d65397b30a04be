//! Background worker mirroring soft-deletes to the backend.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::delete_event::DeleteEvent;
use crate::domain::repositories::LinkBackend;

/// Number of retries after the first failed `mark_deleted` call.
const MAX_RETRIES: usize = 3;

/// Base of the exponential backoff in milliseconds: 10ms, 100ms, 1s before jitter.
const BACKOFF_BASE_MS: u64 = 10;

/// Drains the delete queue until every sender is dropped.
///
/// At most `concurrency` backend calls run at once. Each event is retried
/// with exponential backoff; a final failure is logged and dropped, so a
/// crash or a persistent backend outage can lose deletes. Outstanding tasks
/// are awaited before returning.
pub async fn run_delete_worker<B>(
    mut rx: mpsc::Receiver<DeleteEvent>,
    backend: Arc<B>,
    concurrency: usize,
) where
    B: LinkBackend + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let backend = backend.clone();

        tasks.spawn(async move {
            let _permit = permit;
            mirror_delete(backend.as_ref(), &event).await;
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}
    debug!("Delete worker stopped");
}

async fn mirror_delete<B: LinkBackend + ?Sized>(backend: &B, event: &DeleteEvent) {
    let strategy = ExponentialBackoff::from_millis(BACKOFF_BASE_MS)
        .map(jitter)
        .take(MAX_RETRIES);

    let result = Retry::start(strategy, move || {
        backend.mark_deleted(&event.person, &event.short_id)
    })
    .await;

    match result {
        Ok(()) => {
            metrics::counter!("link_deletes_mirrored_total").increment(1);
            debug!(short_id = %event.short_id, "Soft delete mirrored to backend");
        }
        Err(e) => {
            metrics::counter!("link_deletes_failed_total").increment(1);
            warn!(
                short_id = %event.short_id,
                person = %event.person,
                error = %e,
                "Dropping soft delete after retries"
            );
        }
    }
}
