//! DTOs for per-user link listing.

use serde::{Deserialize, Serialize};

/// A link owned by the caller.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUrl {
    pub short_url: String,
    pub original_url: String,
}
