use pfm_auth_core::{
    RefreshToken, RefreshTokenStore, RefreshTokenStoreError, SignedToken, TokenError, TokenHash,
    TokenPair, TokenSigner, UserStore, UserStoreError,
};

use crate::{session::open_session, side_effect::best_effort};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RefreshError {
    #[error("Invalid refresh token: {0}")]
    InvalidToken(TokenError),
    #[error("Refresh token not found or revoked")]
    TokenNotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("Account is deactivated")]
    AccountDeactivated,
    #[error("Failed to issue tokens: {0}")]
    TokenSigningFailure(TokenError),
    #[error("Storage error: {0}")]
    PersistenceFailure(String),
}

impl From<RefreshTokenStoreError> for RefreshError {
    fn from(error: RefreshTokenStoreError) -> Self {
        match error {
            RefreshTokenStoreError::TokenNotFound => Self::TokenNotFound,
            other => Self::PersistenceFailure(other.to_string()),
        }
    }
}

impl From<UserStoreError> for RefreshError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => Self::UserNotFound,
            other => Self::PersistenceFailure(other.to_string()),
        }
    }
}

/// Refresh use case - rotates a refresh token into a new token pair
pub struct RefreshUseCase<'a, U, R, S>
where
    U: UserStore,
    R: RefreshTokenStore,
    S: TokenSigner,
{
    user_store: &'a U,
    refresh_token_store: &'a R,
    token_signer: &'a S,
}

impl<'a, U, R, S> RefreshUseCase<'a, U, R, S>
where
    U: UserStore,
    R: RefreshTokenStore,
    S: TokenSigner,
{
    pub fn new(user_store: &'a U, refresh_token_store: &'a R, token_signer: &'a S) -> Self {
        Self {
            user_store,
            refresh_token_store,
            token_signer,
        }
    }

    /// Execute the refresh use case
    ///
    /// Each refresh token is accepted once: its record is revoked before the
    /// replacement pair is issued.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token from a previous login or refresh
    ///
    /// # Returns
    /// A new token pair
    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: RefreshToken) -> Result<TokenPair, RefreshError> {
        let claims = self.token_signer.verify(&refresh_token).map_err(|e| {
            tracing::info!(error = %e, "Refresh rejected: invalid token");
            RefreshError::InvalidToken(e)
        })?;

        let token_hash = TokenHash::of(refresh_token.as_str());
        let record = match self.refresh_token_store.find_by_hash(&token_hash).await {
            Ok(record) => record,
            Err(RefreshTokenStoreError::TokenNotFound) => {
                // A rotated or logged-out token being replayed lands here.
                tracing::info!(
                    user_id = %claims.user_id,
                    "Refresh rejected: token not found or revoked"
                );
                return Err(RefreshError::TokenNotFound);
            }
            Err(e) => return Err(e.into()),
        };
        if record.user_id != claims.user_id || !record.is_valid() {
            tracing::info!(user_id = %claims.user_id, "Refresh rejected: record mismatch");
            return Err(RefreshError::TokenNotFound);
        }

        let user = match self.user_store.find_by_id(&claims.user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                tracing::info!(user_id = %claims.user_id, "Refresh rejected: user not found");
                return Err(RefreshError::UserNotFound);
            }
            Err(e) => return Err(e.into()),
        };
        if !user.is_active {
            tracing::info!(user_id = %user.id, "Refresh rejected: account deactivated");
            return Err(RefreshError::AccountDeactivated);
        }

        // TODO: two concurrent refreshes with the same token can both pass the
        // lookup above; make revocation a conditional update that reports
        // whether this call flipped the flag.
        best_effort(
            "revoke rotated refresh token",
            self.refresh_token_store.revoke_by_hash(&token_hash),
        )
        .await;

        open_session(self.refresh_token_store, self.token_signer, &user)
            .await
            .map_err(RefreshError::TokenSigningFailure)
    }
}
