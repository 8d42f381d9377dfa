use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};

use super::user_id::UserId;

/// Purpose a signed token was issued for. Tokens of one kind are never
/// accepted where another kind is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
    Reset,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
            TokenKind::Reset => "reset",
        };
        f.write_str(kind)
    }
}

/// Verified contents of a signed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub email: String,
    pub kind: TokenKind,
    pub issuer: String,
    pub issued_at: DateTime<Utc>,
    pub not_before: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A serialized signed token whose expected kind is fixed by its type.
pub trait SignedToken: Sized {
    const KIND: TokenKind;

    fn from_secret(token: Secret<String>) -> Self;

    fn as_str(&self) -> &str;
}

macro_rules! signed_token {
    ($(#[$meta:meta])* $name:ident => $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(Secret<String>);

        impl SignedToken for $name {
            const KIND: TokenKind = $kind;

            fn from_secret(token: Secret<String>) -> Self {
                Self(token)
            }

            fn as_str(&self) -> &str {
                self.0.expose_secret()
            }
        }

        impl From<String> for $name {
            fn from(token: String) -> Self {
                Self(Secret::from(token))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $name {}
    };
}

signed_token!(
    /// Short-lived bearer token for protected calls.
    AccessToken => TokenKind::Access
);
signed_token!(
    /// Long-lived token exchanged for a new pair, backed by a stored digest.
    RefreshToken => TokenKind::Refresh
);
signed_token!(
    /// Token delivered out of band to authorize a password reset.
    ResetToken => TokenKind::Reset
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    /// Lifetime of the access token in seconds.
    pub expires_in: i64,
}

impl Serialize for TokenPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("TokenPair", 3)?;
        state.serialize_field("access_token", self.access_token.as_str())?;
        state.serialize_field("refresh_token", self.refresh_token.as_str())?;
        state.serialize_field("expires_in", &self.expires_in)?;
        state.end()
    }
}
