use pfm_auth_core::{
    Email, Password, PasswordHashError, PasswordHasher, RefreshTokenStore, TokenError,
    TokenSigner, User, UserStore, UserStoreError,
};

use super::strength_rejection;
use crate::{
    responses::{AuthSession, UserProfile},
    session::open_session,
};

/// Input of a registration.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: Email,
    pub password: Password,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    WeakPassword(String),
    #[error("User with this email already exists")]
    EmailTaken,
    #[error("Failed to hash password: {0}")]
    HashingFailure(String),
    #[error("Failed to issue tokens: {0}")]
    TokenSigningFailure(#[from] TokenError),
    #[error("User store error: {0}")]
    PersistenceFailure(UserStoreError),
}

impl From<PasswordHashError> for RegisterError {
    fn from(error: PasswordHashError) -> Self {
        match error {
            PasswordHashError::TooShort { .. } | PasswordHashError::TooLong { .. } => {
                Self::WeakPassword(error.to_string())
            }
            other => Self::HashingFailure(other.to_string()),
        }
    }
}

impl From<UserStoreError> for RegisterError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => Self::EmailTaken,
            other => Self::PersistenceFailure(other),
        }
    }
}

/// Register use case - creates an account and opens its first session
pub struct RegisterUseCase<'a, U, R, H, S>
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

impl<'a, U, R, H, S> RegisterUseCase<'a, U, R, H, S>
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

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `request` - Email, plaintext password and names of the new user
    ///
    /// # Returns
    /// The public profile of the new user and a fresh token pair
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, request: RegisterRequest) -> Result<AuthSession, RegisterError> {
        let RegisterRequest {
            email,
            password,
            first_name,
            last_name,
        } = request;

        if let Some(reason) = strength_rejection(&password) {
            return Err(RegisterError::WeakPassword(reason));
        }

        if self.user_store.exists_by_email(&email).await? {
            return Err(RegisterError::EmailTaken);
        }

        let password_hash = self.password_hasher.hash(&password).await?;
        let user = User::new(email, password_hash, first_name, last_name);

        // A concurrent registration can still win the unique index here.
        self.user_store.create(user.clone()).await?;
        tracing::info!(user_id = %user.id, "User registered");

        let tokens = open_session(self.refresh_token_store, self.token_signer, &user).await?;

        Ok(AuthSession {
            user: UserProfile::from(&user),
            tokens,
        })
    }
}
