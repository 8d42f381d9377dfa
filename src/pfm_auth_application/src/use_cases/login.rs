use pfm_auth_core::{
    Email, Password, PasswordHasher, RefreshTokenStore, TokenError, TokenSigner, UserStore,
    UserStoreError,
};

use crate::{
    responses::{AuthSession, UserProfile},
    session::open_session,
};

/// Error types specific to login use case
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account is deactivated")]
    AccountDeactivated,
    #[error("Failed to issue tokens: {0}")]
    TokenSigningFailure(#[from] TokenError),
    #[error("User store error: {0}")]
    PersistenceFailure(UserStoreError),
}

/// Login use case - authenticates credentials and opens a session
pub struct LoginUseCase<'a, U, R, H, S>
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

impl<'a, U, R, H, S> LoginUseCase<'a, U, R, H, S>
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

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `password` - User's password
    ///
    /// # Returns
    /// The user's profile and a fresh token pair. Unknown email and wrong
    /// password are indistinguishable.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<AuthSession, LoginError> {
        let user = match self.user_store.find_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => return Err(LoginError::InvalidCredentials),
            Err(e) => return Err(LoginError::PersistenceFailure(e)),
        };

        if self
            .password_hasher
            .verify(&password, &user.password_hash)
            .await
            .is_err()
        {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(LoginError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login rejected: account deactivated");
            return Err(LoginError::AccountDeactivated);
        }

        let tokens = open_session(self.refresh_token_store, self.token_signer, &user).await?;

        Ok(AuthSession {
            user: UserProfile::from(&user),
            tokens,
        })
    }
}
