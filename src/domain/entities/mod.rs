//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping with its owner
//! - [`Snapshot`] - Everything a backend holds, split into active and soft-deleted links

pub mod link;

pub use link::{Link, Snapshot};
