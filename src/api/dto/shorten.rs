//! DTOs for link shortening endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body of `POST /api/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Response body of `POST /api/shorten`, also used for conflicts.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub result: String,
}

/// One entry of a `POST /api/shorten/batch` request.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchItem {
    pub correlation_id: String,

    #[validate(length(min = 1, max = 2048))]
    pub original_url: String,
}

/// One entry of a `POST /api/shorten/batch` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResultItem {
    pub correlation_id: String,
    pub short_url: String,
}
