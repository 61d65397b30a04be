//! Application layer services implementing business logic.
//!
//! Services consume the backend trait and the in-memory index and provide a
//! small API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and soft deletion
//! - [`services::identity_service::IdentityService`] - Signed person cookies

pub mod services;
