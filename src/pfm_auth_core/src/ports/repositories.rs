use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email, opaque_token::TokenHash, refresh_token::RefreshTokenRecord, user::User,
    user_id::UserId,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistence of user identities. Email uniqueness is the store's job:
/// `create` must fail with `UserAlreadyExists` on a duplicate, even under
/// concurrent registrations.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: User) -> Result<(), UserStoreError>;
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn update(&self, user: &User) -> Result<(), UserStoreError>;
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError>;
}

// RefreshTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RefreshTokenStoreError {
    #[error("Refresh token not found or expired")]
    TokenNotFound,
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl PartialEq for RefreshTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::TokenNotFound, Self::TokenNotFound)
                | (Self::DatabaseError(_), Self::DatabaseError(_))
        )
    }
}

/// Persistence of refresh token digests.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), RefreshTokenStoreError>;

    /// Only returns records that are neither revoked nor expired; anything
    /// else is `TokenNotFound`.
    async fn find_by_hash(
        &self,
        token_hash: &TokenHash,
    ) -> Result<RefreshTokenRecord, RefreshTokenStoreError>;

    async fn revoke_by_hash(&self, token_hash: &TokenHash) -> Result<(), RefreshTokenStoreError>;

    /// Revokes every non-revoked record of the user and returns how many were flipped.
    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<u64, RefreshTokenStoreError>;

    /// Physically removes expired records. Maintenance only; never called by
    /// the auth flows.
    async fn delete_expired(&self) -> Result<u64, RefreshTokenStoreError>;
}
