//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{id}`     - Short link redirect (public)
//! - `GET  /ping`     - Storage liveness (public)
//! - `GET  /health`   - Storage and delete queue report (public)
//! - everything else  - Identified routes, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Identity** - `person`/`token` cookies on identified routes
//! - **Compression** - gzip responses, gzip request bodies
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::{health_handler, ping_handler, redirect_handler};
use crate::api::middleware::{identity, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let identified = api::routes::identified_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), identity::layer),
    );

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/{id}", get(redirect_handler))
        .merge(identified)
        .with_state(state)
        .layer(RequestDecompressionLayer::new())
        .layer(CompressionLayer::new())
        .layer(tracing::layer())
}
