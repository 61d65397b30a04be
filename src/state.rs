//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{IdentityService, LinkService};
use crate::domain::repositories::LinkBackend;

/// Storage facade over whichever backend was configured.
pub type Links = LinkService<dyn LinkBackend>;

#[derive(Clone)]
pub struct AppState {
    pub links: Arc<Links>,
    pub identity: Arc<IdentityService>,
    pub base_url: String,
}

impl AppState {
    pub fn new(
        links: Arc<Links>,
        identity: Arc<IdentityService>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            links,
            identity,
            base_url: base_url.into(),
        }
    }

    /// Absolute short URL for `short_id`.
    pub fn short_url(&self, short_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_id)
    }
}
