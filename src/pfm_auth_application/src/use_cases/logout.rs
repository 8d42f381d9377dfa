use pfm_auth_core::{RefreshTokenStore, RefreshTokenStoreError, UserId};

#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Refresh token store error: {0}")]
    PersistenceFailure(#[from] RefreshTokenStoreError),
}

/// Logout use case - revokes every live refresh token of a user
pub struct LogoutUseCase<'a, R>
where
    R: RefreshTokenStore,
{
    refresh_token_store: &'a R,
}

impl<'a, R> LogoutUseCase<'a, R>
where
    R: RefreshTokenStore,
{
    pub fn new(refresh_token_store: &'a R) -> Self {
        Self {
            refresh_token_store,
        }
    }

    /// Execute the logout use case
    ///
    /// Idempotent: logging out with no live session succeeds. Access tokens
    /// already handed out stay valid until they expire.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<(), LogoutError> {
        let revoked = self
            .refresh_token_store
            .revoke_all_for_user(&user_id)
            .await?;
        tracing::info!(revoked, "User logged out");
        Ok(())
    }
}
