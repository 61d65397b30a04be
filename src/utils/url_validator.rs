//! Long URL validation performed before any storage call.

use url::Url;

use crate::domain::StorageError;

/// Maximum accepted length of a long URL, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Checks that `input` is an absolute URI no longer than [`MAX_URL_LENGTH`].
///
/// The URL is stored exactly as given; no normalization happens here.
///
/// # Errors
///
/// Returns [`StorageError::InvalidInput`] when the URL is too long, contains
/// control characters or surrounding whitespace, or does not parse as an
/// absolute URI.
pub fn validate_long_url(input: &str) -> Result<(), StorageError> {
    let length = input.chars().count();
    if length > MAX_URL_LENGTH {
        return Err(StorageError::InvalidInput(format!(
            "the link cannot be longer than {MAX_URL_LENGTH} characters, got {length}"
        )));
    }

    // The WHATWG parser strips these silently, but the raw input is what gets stored.
    if input.chars().any(|c| c.is_control()) {
        return Err(StorageError::InvalidInput("the link contains control characters".to_string()));
    }
    if input.trim() != input {
        return Err(StorageError::InvalidInput(
            "the link has leading or trailing whitespace".to_string(),
        ));
    }

    Url::parse(input)
        .map_err(|e| StorageError::InvalidInput(format!("the link is invalid: {e}")))?;

    Ok(())
}
