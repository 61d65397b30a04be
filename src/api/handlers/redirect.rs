//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its original URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// The lookup is not scoped to the caller: any active link resolves.
///
/// # Errors
///
/// - 404 Not Found if the id was never created
/// - 410 Gone if the link was soft-deleted
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = state.links.resolve(None, &short_id)?;

    debug!(short_id = %short_id, "Redirecting");
    Ok(Redirect::temporary(&long_url))
}
