use pfm_auth_core::{TokenPair, User, UserId};
use serde::Serialize;

pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account with this email exists, a password reset link has been sent";
pub const PASSWORD_RESET_MESSAGE: &str = "Password has been reset successfully";

/// User data that is safe to hand back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub is_active: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            is_active: user.is_active,
        }
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: UserProfile,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}
