//! Handlers for link shortening endpoints.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{BatchItem, BatchResultItem, ShortenRequest, ShortenResponse};
use crate::api::middleware::identity::Person;
use crate::domain::error::StorageError;
use crate::error::AppError;
use crate::state::AppState;

/// Outcome of a single shorten call that produced a usable id.
enum Shortened {
    /// Created now or reused from an identical active link.
    Ready(String),
    /// The id is already taken; the caller gets a conflict pointing at it.
    Taken(String),
}

async fn shorten(state: &AppState, person: &Person, long_url: &str) -> Result<Shortened, AppError> {
    match state.links.shorten_or_reuse(person.as_str(), long_url).await {
        Ok(short_id) => Ok(Shortened::Ready(short_id)),
        Err(StorageError::Duplicate { short_id }) => Ok(Shortened::Taken(short_id)),
        Err(e) => Err(e.into()),
    }
}

/// Shortens a URL sent as a plain-text body.
///
/// # Endpoint
///
/// `POST /`
///
/// # Response Codes
///
/// - **201 Created**: body is the short URL
/// - **409 Conflict**: body is the already existing short URL
/// - **400 Bad Request**: empty, too long or malformed URL
pub async fn shorten_text_handler(
    State(state): State<AppState>,
    Extension(person): Extension<Person>,
    body: String,
) -> Result<(StatusCode, String), AppError> {
    let long_url = body.trim();
    if long_url.is_empty() {
        return Err(AppError::bad_request(
            "Invalid URL",
            json!({ "reason": "empty body" }),
        ));
    }

    match shorten(&state, &person, long_url).await? {
        Shortened::Ready(short_id) => Ok((StatusCode::CREATED, state.short_url(&short_id))),
        Shortened::Taken(short_id) => Ok((StatusCode::CONFLICT, state.short_url(&short_id))),
    }
}

/// Shortens a URL sent as JSON.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "result": "http://localhost:8080/abc123" }
/// ```
///
/// Returned with 201 Created, or 409 Conflict when the id is already taken.
pub async fn shorten_json_handler(
    State(state): State<AppState>,
    Extension(person): Extension<Person>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let (status, short_id) = match shorten(&state, &person, &payload.url).await? {
        Shortened::Ready(short_id) => (StatusCode::CREATED, short_id),
        Shortened::Taken(short_id) => (StatusCode::CONFLICT, short_id),
    };

    Ok((
        status,
        Json(ShortenResponse {
            result: state.short_url(&short_id),
        }),
    ))
}

/// Shortens several URLs at once.
///
/// # Endpoint
///
/// `POST /api/shorten/batch`
///
/// # Request Body
///
/// ```json
/// [{ "correlation_id": "1", "original_url": "https://example.com" }]
/// ```
///
/// # Response
///
/// ```json
/// [{ "correlation_id": "1", "short_url": "http://localhost:8080/abc123" }]
/// ```
///
/// Taken ids resolve to the existing short URL. Any other failure rejects
/// the whole batch; items processed before it stay created.
pub async fn shorten_batch_handler(
    State(state): State<AppState>,
    Extension(person): Extension<Person>,
    Json(items): Json<Vec<BatchItem>>,
) -> Result<(StatusCode, Json<Vec<BatchResultItem>>), AppError> {
    if items.is_empty() {
        return Err(AppError::bad_request(
            "Empty batch",
            json!({ "reason": "at least one item is required" }),
        ));
    }

    for item in &items {
        item.validate()?;
    }

    let mut results = Vec::with_capacity(items.len());

    for item in items {
        let short_id = match shorten(&state, &person, &item.original_url).await? {
            Shortened::Ready(short_id) | Shortened::Taken(short_id) => short_id,
        };

        results.push(BatchResultItem {
            correlation_id: item.correlation_id,
            short_url: state.short_url(&short_id),
        });
    }

    Ok((StatusCode::CREATED, Json(results)))
}
