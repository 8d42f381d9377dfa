use chrono::{DateTime, Duration, Utc};

use super::{opaque_token::TokenHash, user_id::UserId};

/// Server-side trace of one issued refresh token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTokenRecord {
    pub user_id: UserId,
    pub token_hash: TokenHash,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn new(user_id: UserId, token_hash: TokenHash, time_to_live: Duration) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            token_hash,
            expires_at: now + time_to_live,
            revoked: false,
            created_at: now,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
