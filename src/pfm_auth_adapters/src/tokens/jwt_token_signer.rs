use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use pfm_auth_core::{
    AccessToken, Email, RefreshToken, ResetToken, SignedToken, TokenClaims, TokenError, TokenKind,
    TokenSigner, UserId, generate_opaque_token,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct JwtSignerConfig {
    /// Signs access and reset tokens.
    pub access_secret: Secret<String>,
    pub refresh_secret: Secret<String>,
    pub issuer: String,
    pub access_time_to_live: Duration,
    pub refresh_time_to_live: Duration,
    pub reset_time_to_live: Duration,
}

/// HS256 signer with one key for access and reset tokens and another for
/// refresh tokens.
#[derive(Clone)]
pub struct JwtTokenSigner {
    config: JwtSignerConfig,
}

impl JwtTokenSigner {
    pub fn new(config: JwtSignerConfig) -> Self {
        Self { config }
    }

    fn secret_for(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access | TokenKind::Reset => {
                self.config.access_secret.expose_secret().as_bytes()
            }
            TokenKind::Refresh => self.config.refresh_secret.expose_secret().as_bytes(),
        }
    }

    fn time_to_live(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_time_to_live,
            TokenKind::Refresh => self.config.refresh_time_to_live,
            TokenKind::Reset => self.config.reset_time_to_live,
        }
    }

    fn issue<T: SignedToken>(&self, user_id: UserId, email: &Email) -> Result<T, TokenError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.time_to_live(T::KIND))
            .ok_or_else(|| TokenError::SigningFailure("Duration out of range".to_string()))?;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            user_id,
            email: email.as_str().to_owned(),
            kind: T::KIND,
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: generate_opaque_token().expose_secret().clone(),
        };

        let token = sign(&claims, self.secret_for(T::KIND))?;
        Ok(T::from_secret(Secret::from(token)))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation
    }
}

impl TokenSigner for JwtTokenSigner {
    fn issue_access(&self, user_id: UserId, email: &Email) -> Result<AccessToken, TokenError> {
        self.issue(user_id, email)
    }

    fn issue_refresh(&self, user_id: UserId, email: &Email) -> Result<RefreshToken, TokenError> {
        self.issue(user_id, email)
    }

    fn issue_reset(&self, user_id: UserId, email: &Email) -> Result<ResetToken, TokenError> {
        self.issue(user_id, email)
    }

    fn validate(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError> {
        // The declared kind picks the key; an unverified kind is never trusted
        // beyond that.
        let declared = peek_kind(token)?;

        let claims = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret_for(declared)),
            &self.validation(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::ImmatureSignature => TokenError::NotYetValid,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            _ => TokenError::Malformed,
        })?;

        if claims.kind != expected {
            return Err(TokenError::WrongKind {
                expected,
                found: claims.kind,
            });
        }

        claims.try_into()
    }

    fn access_time_to_live(&self) -> Duration {
        self.config.access_time_to_live
    }

    fn refresh_time_to_live(&self) -> Duration {
        self.config.refresh_time_to_live
    }
}

/// Wire form of the claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct JwtClaims {
    pub sub: String,
    pub user_id: UserId,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
}

impl TryFrom<JwtClaims> for TokenClaims {
    type Error = TokenError;

    fn try_from(claims: JwtClaims) -> Result<Self, Self::Error> {
        let timestamp =
            |secs: i64| DateTime::<Utc>::from_timestamp(secs, 0).ok_or(TokenError::Malformed);

        Ok(TokenClaims {
            user_id: claims.user_id,
            email: claims.email,
            kind: claims.kind,
            issuer: claims.iss,
            issued_at: timestamp(claims.iat)?,
            not_before: timestamp(claims.nbf)?,
            expires_at: timestamp(claims.exp)?,
        })
    }
}

#[derive(Deserialize)]
struct DeclaredKind {
    #[serde(rename = "type")]
    kind: TokenKind,
}

fn peek_kind(token: &str) -> Result<TokenKind, TokenError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed);
    };

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;
    let declared: DeclaredKind =
        serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;
    Ok(declared.kind)
}

pub(crate) fn sign(claims: &JwtClaims, secret: &[u8]) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::SigningFailure(e.to_string()))
}
