//! Trust-on-first-use caller identity.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Number of MAC bytes kept in a token (16 hex characters).
const TOKEN_BYTES: usize = 8;

/// A caller's person id together with its signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub person: String,
    pub token: String,
}

/// Issues and verifies `person` / `token` cookie pairs.
///
/// The token is the HMAC-SHA256 of the person id keyed by the server secret,
/// truncated to its first 8 bytes and hex-encoded. It only proves the id was
/// issued by this server; it is not an authentication mechanism.
#[derive(Debug, Clone)]
pub struct IdentityService {
    secret: String,
}

impl IdentityService {
    /// Creates a new identity service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key; must match the value used when cookies were issued
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, person: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(person.as_bytes());
        mac
    }

    /// Signs a person id.
    pub fn sign(&self, person: &str) -> String {
        let tag = self.mac(person).finalize().into_bytes();
        hex::encode(&tag[..TOKEN_BYTES])
    }

    /// Checks that `token` was issued for `person` with this secret.
    pub fn verify(&self, person: &str, token: &str) -> bool {
        if person.is_empty() {
            return false;
        }

        match hex::decode(token) {
            Ok(tag) if tag.len() == TOKEN_BYTES => {
                self.mac(person).verify_truncated_left(&tag).is_ok()
            }
            _ => false,
        }
    }

    /// Issues a fresh identity with a random UUIDv4 person id.
    pub fn issue(&self) -> Identity {
        let person = Uuid::new_v4().to_string();
        let token = self.sign(&person);
        Identity { person, token }
    }
}
