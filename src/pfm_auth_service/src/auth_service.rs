use pfm_auth_adapters::{
    Argon2PasswordHasher, JwtTokenSigner, PostgresRefreshTokenStore, PostgresUserStore,
    PostmarkEmailClient,
};
use pfm_auth_application::{
    AuthSession, ChangePasswordError, ChangePasswordUseCase, ForgotPasswordUseCase, LoginError,
    LoginUseCase, LogoutError, LogoutUseCase, MessageResponse, ProfileError, ProfileUseCase,
    RefreshError, RefreshUseCase, RegisterError, RegisterRequest, RegisterUseCase,
    ResetPasswordError, ResetPasswordUseCase, UpdateProfileRequest, UserProfile,
};
use pfm_auth_core::{
    AccessToken, Email, EmailClient, Password, PasswordHasher, RefreshToken, RefreshTokenStore,
    ResetToken, TokenClaims, TokenError, TokenPair, TokenSigner, UserId, UserStore,
};

/// The service as deployed: PostgreSQL persistence, Argon2id hashing, HS256
/// tokens and Postmark delivery.
pub type PostgresAuthService = AuthService<
    PostgresUserStore,
    PostgresRefreshTokenStore,
    Argon2PasswordHasher,
    JwtTokenSigner,
    PostmarkEmailClient,
>;

/// Entry point for every auth flow.
///
/// Owns one instance of each collaborator and hands references to a fresh
/// use case per call. Callers that sit behind HTTP turn the returned errors
/// into responses with `pfm_auth_adapters::http::AuthApiError`.
pub struct AuthService<U, R, H, S, E> {
    user_store: U,
    refresh_token_store: R,
    password_hasher: H,
    token_signer: S,
    email_client: E,
    password_reset_url: String,
}

impl<U, R, H, S, E> AuthService<U, R, H, S, E>
where
    U: UserStore,
    R: RefreshTokenStore,
    H: PasswordHasher,
    S: TokenSigner,
    E: EmailClient,
{
    /// Create a new AuthService from its collaborators
    ///
    /// # Arguments
    /// * `user_store` - Store for user identities
    /// * `refresh_token_store` - Store for refresh token digests
    /// * `password_hasher` - Slow password hashing
    /// * `token_signer` - Issues and validates access, refresh and reset tokens
    /// * `email_client` - Delivers password reset links
    /// * `password_reset_url` - Page the reset link points at
    pub fn new(
        user_store: U,
        refresh_token_store: R,
        password_hasher: H,
        token_signer: S,
        email_client: E,
        password_reset_url: String,
    ) -> Self {
        Self {
            user_store,
            refresh_token_store,
            password_hasher,
            token_signer,
            email_client,
            password_reset_url,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSession, RegisterError> {
        RegisterUseCase::new(
            &self.user_store,
            &self.refresh_token_store,
            &self.password_hasher,
            &self.token_signer,
        )
        .execute(request)
        .await
    }

    pub async fn login(&self, email: Email, password: Password) -> Result<AuthSession, LoginError> {
        LoginUseCase::new(
            &self.user_store,
            &self.refresh_token_store,
            &self.password_hasher,
            &self.token_signer,
        )
        .execute(email, password)
        .await
    }

    pub async fn refresh(&self, refresh_token: RefreshToken) -> Result<TokenPair, RefreshError> {
        RefreshUseCase::new(
            &self.user_store,
            &self.refresh_token_store,
            &self.token_signer,
        )
        .execute(refresh_token)
        .await
    }

    pub async fn logout(&self, user_id: UserId) -> Result<(), LogoutError> {
        LogoutUseCase::new(&self.refresh_token_store)
            .execute(user_id)
            .await
    }

    /// Never reveals whether `email` belongs to an account.
    pub async fn forgot_password(&self, email: Email) -> MessageResponse {
        ForgotPasswordUseCase::new(
            &self.user_store,
            &self.token_signer,
            &self.email_client,
            &self.password_reset_url,
        )
        .execute(email)
        .await
    }

    pub async fn reset_password(
        &self,
        reset_token: ResetToken,
        new_password: Password,
    ) -> Result<MessageResponse, ResetPasswordError> {
        ResetPasswordUseCase::new(
            &self.user_store,
            &self.refresh_token_store,
            &self.password_hasher,
            &self.token_signer,
        )
        .execute(reset_token, new_password)
        .await
    }

    pub async fn change_password(
        &self,
        user_id: UserId,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        ChangePasswordUseCase::new(
            &self.user_store,
            &self.refresh_token_store,
            &self.password_hasher,
        )
        .execute(user_id, old_password, new_password)
        .await
    }

    pub async fn get_profile(&self, user_id: UserId) -> Result<UserProfile, ProfileError> {
        ProfileUseCase::new(&self.user_store).get(user_id).await
    }

    pub async fn update_profile(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, ProfileError> {
        ProfileUseCase::new(&self.user_store)
            .update(user_id, request)
            .await
    }

    /// Claims of a valid access token. Refresh and reset tokens are rejected.
    pub fn authenticate(&self, access_token: &AccessToken) -> Result<TokenClaims, TokenError> {
        self.token_signer.verify(access_token)
    }

    pub fn token_signer(&self) -> &S {
        &self.token_signer
    }

    pub fn refresh_token_store(&self) -> &R {
        &self.refresh_token_store
    }
}
