//! Backend trait definitions for the domain layer.
//!
//! The storage facade talks to persistence only through [`LinkBackend`].
//! Concrete variants live in `crate::infrastructure::persistence` and are
//! selected once at startup.
//!
//! # Testing
//!
//! A mock implementation is generated via `mockall` for unit tests.

pub mod link_backend;

pub use link_backend::LinkBackend;

#[cfg(test)]
pub use link_backend::MockLinkBackend;
