use pfm_auth_core::{
    Password, PasswordHashError, PasswordHasher, RefreshTokenStore, ResetToken, TokenSigner,
    UserStore, UserStoreError,
};

use super::strength_rejection;
use crate::responses::{MessageResponse, PASSWORD_RESET_MESSAGE};
use crate::side_effect::best_effort;

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,
    #[error("{0}")]
    WeakPassword(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Failed to hash password: {0}")]
    HashingFailure(String),
    #[error("User store error: {0}")]
    PersistenceFailure(UserStoreError),
}

impl From<PasswordHashError> for ResetPasswordError {
    fn from(error: PasswordHashError) -> Self {
        match error {
            PasswordHashError::TooShort { .. } | PasswordHashError::TooLong { .. } => {
                Self::WeakPassword(error.to_string())
            }
            other => Self::HashingFailure(other.to_string()),
        }
    }
}

impl From<UserStoreError> for ResetPasswordError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => Self::UserNotFound,
            other => Self::PersistenceFailure(other),
        }
    }
}

/// Reset password use case - sets a new password from a reset token
pub struct ResetPasswordUseCase<'a, U, R, H, S>
where
    U: UserStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
    S: TokenSigner,
{
    user_store: &'a U,
    refresh_token_store: &'a R,
    password_hasher: &'a H,
    token_signer: &'a S,
}

impl<'a, U, R, H, S> ResetPasswordUseCase<'a, U, R, H, S>
where
    U: UserStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
    S: TokenSigner,
{
    pub fn new(
        user_store: &'a U,
        refresh_token_store: &'a R,
        password_hasher: &'a H,
        token_signer: &'a S,
    ) -> Self {
        Self {
            user_store,
            refresh_token_store,
            password_hasher,
            token_signer,
        }
    }

    /// Execute the reset password use case
    ///
    /// On success every refresh token of the user is revoked.
    ///
    /// # Arguments
    /// * `reset_token` - Token from the reset link
    /// * `new_password` - Replacement password
    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        reset_token: ResetToken,
        new_password: Password,
    ) -> Result<MessageResponse, ResetPasswordError> {
        let claims = self.token_signer.verify(&reset_token).map_err(|e| {
            tracing::debug!(error = %e, "Reset token rejected");
            ResetPasswordError::InvalidOrExpiredToken
        })?;

        if let Some(reason) = strength_rejection(&new_password) {
            return Err(ResetPasswordError::WeakPassword(reason));
        }

        let mut user = self.user_store.find_by_id(&claims.user_id).await?;
        let password_hash = self.password_hasher.hash(&new_password).await?;
        user.set_password_hash(password_hash);
        self.user_store.update(&user).await?;
        tracing::info!(user_id = %user.id, "Password reset");

        best_effort(
            "revoke refresh tokens after password reset",
            self.refresh_token_store.revoke_all_for_user(&user.id),
        )
        .await;

        Ok(MessageResponse::new(PASSWORD_RESET_MESSAGE))
    }
}
