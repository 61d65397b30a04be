//! Deterministic short id derivation.
//!
//! The id is derived from the long URL alone, so the same URL always maps to
//! the same id and duplicates can be detected without a reverse index. The
//! digest is truncated on purpose; collisions are possible and surface as
//! [`crate::domain::StorageError::Duplicate`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use md5::{Digest, Md5};

/// Number of trailing digest bytes fed into the encoder.
const DIGEST_TAIL_BYTES: usize = 5;

/// Derives the short id for a long URL.
///
/// MD5 over the UTF-8 bytes, last five digest bytes, standard base64,
/// lower-cased, final character dropped, then every `/` and `=` deleted.
/// Characters are deleted rather than substituted, so ids are at most 7
/// characters long and shorter when the encoding contained `/`. Ids already
/// stored by earlier deployments depend on this exact scheme.
///
/// # Examples
///
/// ```
/// use link_shortener::utils::short_id::compute_id;
///
/// assert_eq!(compute_id("http://yandex.ru"), "obrnfe4");
/// ```
pub fn compute_id(long_url: &str) -> String {
    let digest = Md5::digest(long_url.as_bytes());
    let tail = &digest[digest.len() - DIGEST_TAIL_BYTES..];

    let mut id = STANDARD.encode(tail).to_ascii_lowercase();
    id.pop();
    id.retain(|c| c != '/' && c != '=');
    id
}
