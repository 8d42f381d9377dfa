pub mod bearer_token_validator;

pub use bearer_token_validator::{BearerTokenValidator, TokenAuthError, extract_bearer_token};
