//! Infrastructure layer for external integrations.
//!
//! This layer implements the backend trait defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Memory, JSON file and PostgreSQL backends

pub mod persistence;
