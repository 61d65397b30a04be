//! Utility functions for short id derivation and URL validation.

pub mod short_id;
pub mod url_validator;
