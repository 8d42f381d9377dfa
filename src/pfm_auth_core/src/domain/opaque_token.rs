use std::fmt;

use secrecy::Secret;
use sha2::{Digest, Sha256};

/// Number of random bytes behind a generated opaque token.
pub const OPAQUE_TOKEN_BYTES: usize = 32;

/// Deterministic SHA-256 digest of a token string, hex encoded.
///
/// Used to index stored refresh tokens without persisting the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    pub fn of(token: &str) -> Self {
        Self(hex::encode(Sha256::digest(token.as_bytes())))
    }

    /// Wraps a digest read back from storage.
    pub fn from_stored(digest: String) -> Self {
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn hash_opaque_token(token: &str) -> TokenHash {
    TokenHash::of(token)
}

/// 32 bytes from the thread-local CSPRNG, hex encoded (64 characters).
pub fn generate_opaque_token() -> Secret<String> {
    let bytes: [u8; OPAQUE_TOKEN_BYTES] = rand::random();
    Secret::from(hex::encode(bytes))
}
