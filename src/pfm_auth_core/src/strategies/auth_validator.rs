use async_trait::async_trait;

/// Trait for validating bearer credentials in front of protected calls.
///
/// Validators extract the token from the request parts, verify it and
/// produce the claims the protected handler works with. They receive the
/// request parts rather than the full request so non-`Sync` bodies are never
/// involved.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The claims extracted from a valid token.
    type Claims: Clone + Send + Sync + 'static;

    /// Typically `http::request::Parts`.
    type RequestParts: Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error>;
}
