//! API route configuration.
//!
//! These routes need a caller identity and are wrapped with
//! [`crate::api::middleware::identity`] by the top-level router.

use crate::api::handlers::{
    delete_user_urls_handler, shorten_batch_handler, shorten_json_handler, shorten_text_handler,
    user_urls_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes bound to the caller's person id.
///
/// # Endpoints
///
/// - `POST   /`                   - Shorten a plain-text URL
/// - `POST   /api/shorten`        - Shorten a JSON URL
/// - `POST   /api/shorten/batch`  - Shorten several URLs
/// - `GET    /api/user/urls`      - List the caller's links
/// - `DELETE /api/user/urls`      - Soft-delete the caller's links
pub fn identified_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(shorten_text_handler))
        .route("/api/shorten", post(shorten_json_handler))
        .route("/api/shorten/batch", post(shorten_batch_handler))
        .route(
            "/api/user/urls",
            get(user_urls_handler).delete(delete_user_urls_handler),
        )
}
