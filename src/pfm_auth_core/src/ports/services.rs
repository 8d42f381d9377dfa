use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{HashedPassword, Password},
    token::{AccessToken, RefreshToken, ResetToken, SignedToken, TokenClaims, TokenKind, TokenPair},
    user_id::UserId,
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordHashError {
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Password must not exceed {max} characters")]
    TooLong { max: usize },
    #[error("Failed to hash password: {0}")]
    HashingFailure(String),
    #[error("Password does not match")]
    Mismatch,
}

/// Slow, salted one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Fails with `TooShort`/`TooLong` outside the accepted length range;
    /// never truncates.
    async fn hash(&self, password: &Password) -> Result<HashedPassword, PasswordHashError>;

    /// Any failure, including an unreadable stored hash, is `Mismatch`.
    async fn verify(
        &self,
        password: &Password,
        hash: &HashedPassword,
    ) -> Result<(), PasswordHashError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Token is not valid yet")]
    NotYetValid,
    #[error("Invalid token type: expected {expected}, got {found}")]
    WrongKind { expected: TokenKind, found: TokenKind },
    #[error("Failed to sign token: {0}")]
    SigningFailure(String),
}

/// Issues and validates signed, typed, expiring tokens.
pub trait TokenSigner: Send + Sync {
    fn issue_access(&self, user_id: UserId, email: &Email) -> Result<AccessToken, TokenError>;
    fn issue_refresh(&self, user_id: UserId, email: &Email) -> Result<RefreshToken, TokenError>;
    fn issue_reset(&self, user_id: UserId, email: &Email) -> Result<ResetToken, TokenError>;

    /// Checks signature, validity window and that the embedded kind equals
    /// `expected`.
    fn validate(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError>;

    fn access_time_to_live(&self) -> Duration;
    fn refresh_time_to_live(&self) -> Duration;

    /// Both tokens or neither.
    fn issue_pair(&self, user_id: UserId, email: &Email) -> Result<TokenPair, TokenError> {
        let access_token = self.issue_access(user_id, email)?;
        let refresh_token = self.issue_refresh(user_id, email)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.access_time_to_live().num_seconds(),
        })
    }

    /// Validates a typed token against the kind its type stands for.
    fn verify<T: SignedToken>(&self, token: &T) -> Result<TokenClaims, TokenError>
    where
        Self: Sized,
    {
        self.validate(token.as_str(), T::KIND)
    }
}
