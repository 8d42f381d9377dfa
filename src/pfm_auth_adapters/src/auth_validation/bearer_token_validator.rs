use async_trait::async_trait;
use http::{HeaderMap, header::AUTHORIZATION};
use pfm_auth_core::{AccessToken, AuthValidator, TokenClaims, TokenError, TokenSigner};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Accepts requests carrying a valid access token in `Authorization: Bearer`.
#[derive(Clone)]
pub struct BearerTokenValidator<S> {
    token_signer: S,
}

impl<S> BearerTokenValidator<S> {
    pub fn new(token_signer: S) -> Self {
        Self { token_signer }
    }
}

#[async_trait]
impl<S: TokenSigner + Clone + 'static> AuthValidator for BearerTokenValidator<S> {
    type Claims = TokenClaims;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let token = extract_bearer_token(&parts.headers)?;

        self.token_signer
            .verify(&AccessToken::from(token.to_owned()))
            .map_err(TokenAuthError::InvalidToken)
    }
}

#[derive(Debug, Error)]
pub enum TokenAuthError {
    #[error("Missing token")]
    MissingToken,
    #[error("Malformed authorization header")]
    MalformedHeader,
    #[error("Invalid token: {0}")]
    InvalidToken(TokenError),
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?
        .to_str()
        .map_err(|_| TokenAuthError::MalformedHeader)?;

    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenAuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(TokenAuthError::MissingToken);
    }
    Ok(token)
}
