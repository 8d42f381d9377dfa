use pfm_auth_core::{
    Password, PasswordHashError, PasswordHasher, RefreshTokenStore, UserId, UserStore,
    UserStoreError,
};

use super::strength_rejection;
use crate::side_effect::best_effort;

#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("User not found")]
    UserNotFound,
    #[error("Current password is incorrect")]
    WrongOldPassword,
    #[error("{0}")]
    WeakPassword(String),
    #[error("Failed to hash password: {0}")]
    HashingFailure(String),
    #[error("User store error: {0}")]
    PersistenceFailure(UserStoreError),
}

impl From<UserStoreError> for ChangePasswordError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => Self::UserNotFound,
            other => Self::PersistenceFailure(other),
        }
    }
}

impl From<PasswordHashError> for ChangePasswordError {
    fn from(error: PasswordHashError) -> Self {
        match error {
            PasswordHashError::TooShort { .. } | PasswordHashError::TooLong { .. } => {
                Self::WeakPassword(error.to_string())
            }
            PasswordHashError::Mismatch => Self::WrongOldPassword,
            other => Self::HashingFailure(other.to_string()),
        }
    }
}

/// Change password use case - handles password updates for authenticated users
pub struct ChangePasswordUseCase<'a, U, R, H>
where
    U: UserStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    refresh_token_store: &'a R,
    password_hasher: &'a H,
}

impl<'a, U, R, H> ChangePasswordUseCase<'a, U, R, H>
where
    U: UserStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, refresh_token_store: &'a R, password_hasher: &'a H) -> Self {
        Self {
            user_store,
            refresh_token_store,
            password_hasher,
        }
    }

    /// Execute the change password use case
    ///
    /// # Arguments
    /// * `user_id` - Authenticated user
    /// * `old_password` - Current password, re-checked before the change
    /// * `new_password` - Replacement password
    ///
    /// # Returns
    /// Ok(()) on success; every refresh token of the user is revoked
    #[tracing::instrument(
        name = "ChangePasswordUseCase::execute",
        skip(self, old_password, new_password)
    )]
    pub async fn execute(
        &self,
        user_id: UserId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        let mut user = self.user_store.find_by_id(&user_id).await?;

        self.password_hasher
            .verify(&old_password, &user.password_hash)
            .await?;

        if let Some(reason) = strength_rejection(&new_password) {
            return Err(ChangePasswordError::WeakPassword(reason));
        }

        let password_hash = self.password_hasher.hash(&new_password).await?;
        user.set_password_hash(password_hash);
        self.user_store.update(&user).await?;
        tracing::info!("Password changed");

        best_effort(
            "revoke refresh tokens after password change",
            self.refresh_token_store.revoke_all_for_user(&user_id),
        )
        .await;

        Ok(())
    }
}
