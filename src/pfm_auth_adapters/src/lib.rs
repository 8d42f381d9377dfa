pub mod auth_validation;
pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod persistence;
pub mod tokens;

// Re-export commonly used types
pub use auth_validation::{BearerTokenValidator, TokenAuthError, extract_bearer_token};
pub use crate::config::AuthServiceSetting;
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use hashing::Argon2PasswordHasher;
pub use crate::http::{AuthApiError, ErrorResponse};
pub use persistence::{
    HashMapRefreshTokenStore, HashMapUserStore, PostgresRefreshTokenStore, PostgresUserStore,
};
pub use tokens::{JwtSignerConfig, JwtTokenSigner};
