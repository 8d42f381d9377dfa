use http::StatusCode;
use pfm_auth_application::{
    ChangePasswordError, LoginError, LogoutError, ProfileError, RefreshError, RegisterError,
    ResetPasswordError,
};
use pfm_auth_core::{UserError, UserStoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth_validation::TokenAuthError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure an HTTP layer in front of the auth flows has to render.
#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    WeakPassword(String),

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("Current password is incorrect")]
    WrongOldPassword,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDeactivated,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Refresh token not found or revoked")]
    TokenNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl AuthApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthApiError::InvalidInput(_)
            | AuthApiError::WeakPassword(_)
            | AuthApiError::EmailTaken
            | AuthApiError::InvalidOrExpiredToken
            | AuthApiError::WrongOldPassword => StatusCode::BAD_REQUEST,

            AuthApiError::InvalidCredentials
            | AuthApiError::AccountDeactivated
            | AuthApiError::MissingToken
            | AuthApiError::InvalidToken(_)
            | AuthApiError::TokenNotFound => StatusCode::UNAUTHORIZED,

            AuthApiError::UserNotFound => StatusCode::NOT_FOUND,

            AuthApiError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body to send with [`AuthApiError::status_code`]. Internal details of
    /// unexpected errors are logged, not returned.
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            AuthApiError::UnexpectedError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        ErrorResponse { error }
    }
}

impl From<UserError> for AuthApiError {
    fn from(error: UserError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl From<UserStoreError> for AuthApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => AuthApiError::EmailTaken,
            UserStoreError::UserNotFound => AuthApiError::UserNotFound,
            UserStoreError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<TokenAuthError> for AuthApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken => AuthApiError::MissingToken,
            TokenAuthError::MalformedHeader => AuthApiError::InvalidToken(error.to_string()),
            TokenAuthError::InvalidToken(e) => AuthApiError::InvalidToken(e.to_string()),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::WeakPassword(reason) => AuthApiError::WeakPassword(reason),
            RegisterError::EmailTaken => AuthApiError::EmailTaken,
            RegisterError::HashingFailure(e) => AuthApiError::UnexpectedError(e),
            RegisterError::TokenSigningFailure(e) => AuthApiError::UnexpectedError(e.to_string()),
            RegisterError::PersistenceFailure(e) => e.into(),
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => AuthApiError::InvalidCredentials,
            LoginError::AccountDeactivated => AuthApiError::AccountDeactivated,
            LoginError::TokenSigningFailure(e) => AuthApiError::UnexpectedError(e.to_string()),
            LoginError::PersistenceFailure(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<RefreshError> for AuthApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::InvalidToken(e) => AuthApiError::InvalidToken(e.to_string()),
            RefreshError::TokenNotFound => AuthApiError::TokenNotFound,
            // The caller holds a token, not an account: stay at 401.
            RefreshError::UserNotFound => AuthApiError::InvalidToken(error.to_string()),
            RefreshError::AccountDeactivated => AuthApiError::AccountDeactivated,
            RefreshError::TokenSigningFailure(e) => AuthApiError::UnexpectedError(e.to_string()),
            RefreshError::PersistenceFailure(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<LogoutError> for AuthApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::PersistenceFailure(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ResetPasswordError> for AuthApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidOrExpiredToken => AuthApiError::InvalidOrExpiredToken,
            ResetPasswordError::WeakPassword(reason) => AuthApiError::WeakPassword(reason),
            ResetPasswordError::UserNotFound => AuthApiError::UserNotFound,
            ResetPasswordError::HashingFailure(e) => AuthApiError::UnexpectedError(e),
            ResetPasswordError::PersistenceFailure(e) => e.into(),
        }
    }
}

impl From<ChangePasswordError> for AuthApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::UserNotFound => AuthApiError::UserNotFound,
            ChangePasswordError::WrongOldPassword => AuthApiError::WrongOldPassword,
            ChangePasswordError::WeakPassword(reason) => AuthApiError::WeakPassword(reason),
            ChangePasswordError::HashingFailure(e) => AuthApiError::UnexpectedError(e),
            ChangePasswordError::PersistenceFailure(e) => e.into(),
        }
    }
}

impl From<ProfileError> for AuthApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::UserNotFound => AuthApiError::UserNotFound,
            ProfileError::PersistenceFailure(e) => e.into(),
        }
    }
}
