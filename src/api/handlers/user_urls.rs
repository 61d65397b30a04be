//! Handlers for the caller's own links.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::dto::user_urls::UserUrl;
use crate::api::middleware::identity::Person;
use crate::state::AppState;

/// Lists the caller's active links.
///
/// # Endpoint
///
/// `GET /api/user/urls`
///
/// # Response Codes
///
/// - **200 OK**: `[{ "short_url": "...", "original_url": "..." }]`
/// - **204 No Content**: the caller has no active links
pub async fn user_urls_handler(
    State(state): State<AppState>,
    Extension(person): Extension<Person>,
) -> Response {
    let links = state.links.list_active(person.as_str());

    if links.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let urls: Vec<UserUrl> = links
        .into_iter()
        .map(|(short_id, original_url)| UserUrl {
            short_url: state.short_url(&short_id),
            original_url,
        })
        .collect();

    Json(urls).into_response()
}

/// Soft-deletes the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/user/urls`
///
/// # Request Body
///
/// ```json
/// ["abc123", "def456"]
/// ```
///
/// Always answers 202 Accepted. Ids that are unknown or owned by someone
/// else are skipped; the backend is updated in the background.
pub async fn delete_user_urls_handler(
    State(state): State<AppState>,
    Extension(person): Extension<Person>,
    Json(short_ids): Json<Vec<String>>,
) -> StatusCode {
    for short_id in short_ids {
        if let Err(e) = state.links.soft_delete(person.as_str(), &short_id) {
            debug!(short_id = %short_id, error = %e, "Skipping delete");
        }
    }

    StatusCode::ACCEPTED
}
