pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    opaque_token::{TokenHash, generate_opaque_token, hash_opaque_token},
    password::{HashedPassword, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, Password},
    password_policy::{PasswordStrengthReport, evaluate_strength},
    refresh_token::RefreshTokenRecord,
    token::{
        AccessToken, RefreshToken, ResetToken, SignedToken, TokenClaims, TokenKind, TokenPair,
    },
    user::{User, UserError},
    user_id::UserId,
};

pub use ports::{
    repositories::{RefreshTokenStore, RefreshTokenStoreError, UserStore, UserStoreError},
    services::{EmailClient, PasswordHashError, PasswordHasher, TokenError, TokenSigner},
};

pub use strategies::auth_validator::AuthValidator;
