//! In-memory doubles shared by the use case tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, Utc};
use pfm_auth_core::{
    AccessToken, Email, EmailClient, HashedPassword, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
    Password, PasswordHashError, PasswordHasher, RefreshToken, RefreshTokenRecord,
    RefreshTokenStore, RefreshTokenStoreError, ResetToken, SignedToken, TokenClaims, TokenError,
    TokenHash, TokenKind, TokenSigner, User, UserId, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_owned())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::from(Secret::from(raw.to_owned()))
}

pub fn hashed(raw: &str) -> HashedPassword {
    HashedPassword::new(Secret::from(format!("hashed:{raw}")))
}

pub fn user(raw_email: &str, raw_password: &str) -> User {
    User::new(
        email(raw_email),
        hashed(raw_password),
        "Ada".to_owned(),
        "Lovelace".to_owned(),
    )
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    pub users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MockUserStore {
    pub async fn with_user(user: User) -> Self {
        let store = Self::default();
        store.users.write().await.insert(user.id, user);
        store
    }

    pub async fn count_with_email(&self, email: &Email) -> usize {
        self.users
            .read()
            .await
            .values()
            .filter(|user| &user.email == email)
            .count()
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn create(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&user.id).ok_or(UserStoreError::UserNotFound)?;
        *stored = user.clone();
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| &user.email == email))
    }
}

/// Accepts the existence check but loses the race on insert, like a
/// concurrent registration hitting the unique index.
#[derive(Clone, Default)]
pub struct RacingUserStore;

#[async_trait::async_trait]
impl UserStore for RacingUserStore {
    async fn create(&self, _user: User) -> Result<(), UserStoreError> {
        Err(UserStoreError::UserAlreadyExists)
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<User, UserStoreError> {
        Err(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, _email: &Email) -> Result<User, UserStoreError> {
        Err(UserStoreError::UserNotFound)
    }

    async fn update(&self, _user: &User) -> Result<(), UserStoreError> {
        unimplemented!()
    }

    async fn exists_by_email(&self, _email: &Email) -> Result<bool, UserStoreError> {
        Ok(false)
    }
}

#[derive(Clone, Default)]
pub struct MockRefreshTokenStore {
    pub records: Arc<RwLock<HashMap<TokenHash, RefreshTokenRecord>>>,
}

impl MockRefreshTokenStore {
    pub async fn valid_count_for(&self, user_id: &UserId) -> usize {
        self.records
            .read()
            .await
            .values()
            .filter(|record| &record.user_id == user_id && record.is_valid())
            .count()
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MockRefreshTokenStore {
    async fn create(&self, record: RefreshTokenRecord) -> Result<(), RefreshTokenStoreError> {
        self.records
            .write()
            .await
            .insert(record.token_hash.clone(), record);
        Ok(())
    }

    async fn find_by_hash(
        &self,
        token_hash: &TokenHash,
    ) -> Result<RefreshTokenRecord, RefreshTokenStoreError> {
        self.records
            .read()
            .await
            .get(token_hash)
            .filter(|record| record.is_valid())
            .cloned()
            .ok_or(RefreshTokenStoreError::TokenNotFound)
    }

    async fn revoke_by_hash(&self, token_hash: &TokenHash) -> Result<(), RefreshTokenStoreError> {
        if let Some(record) = self.records.write().await.get_mut(token_hash) {
            record.revoked = true;
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<u64, RefreshTokenStoreError> {
        let mut revoked = 0;
        for record in self.records.write().await.values_mut() {
            if &record.user_id == user_id && !record.revoked {
                record.revoked = true;
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn delete_expired(&self) -> Result<u64, RefreshTokenStoreError> {
        unimplemented!()
    }
}

/// Every write fails; reads delegate to an inner store so flows can get past
/// the lookup step.
#[derive(Clone, Default)]
pub struct FailingWritesRefreshTokenStore {
    pub inner: MockRefreshTokenStore,
}

#[async_trait::async_trait]
impl RefreshTokenStore for FailingWritesRefreshTokenStore {
    async fn create(&self, _record: RefreshTokenRecord) -> Result<(), RefreshTokenStoreError> {
        Err(RefreshTokenStoreError::DatabaseError(
            "connection reset".to_owned(),
        ))
    }

    async fn find_by_hash(
        &self,
        token_hash: &TokenHash,
    ) -> Result<RefreshTokenRecord, RefreshTokenStoreError> {
        self.inner.find_by_hash(token_hash).await
    }

    async fn revoke_by_hash(&self, _token_hash: &TokenHash) -> Result<(), RefreshTokenStoreError> {
        Err(RefreshTokenStoreError::DatabaseError(
            "connection reset".to_owned(),
        ))
    }

    async fn revoke_all_for_user(&self, _user_id: &UserId) -> Result<u64, RefreshTokenStoreError> {
        Err(RefreshTokenStoreError::DatabaseError(
            "connection reset".to_owned(),
        ))
    }

    async fn delete_expired(&self) -> Result<u64, RefreshTokenStoreError> {
        unimplemented!()
    }
}

/// Reversible stand-in for a real hasher, with the same length bounds.
#[derive(Clone, Default)]
pub struct MockPasswordHasher;

#[async_trait::async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<HashedPassword, PasswordHashError> {
        let length = password.char_count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(PasswordHashError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(PasswordHashError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }
        Ok(hashed(password.as_ref().expose_secret()))
    }

    async fn verify(
        &self,
        password: &Password,
        hash: &HashedPassword,
    ) -> Result<(), PasswordHashError> {
        if hashed(password.as_ref().expose_secret()).as_ref().expose_secret()
            == hash.as_ref().expose_secret()
        {
            Ok(())
        } else {
            Err(PasswordHashError::Mismatch)
        }
    }
}

/// Produces `kind|user_id|email|serial` strings; validation only checks the
/// kind and shape.
#[derive(Clone, Default)]
pub struct MockTokenSigner {
    serial: Arc<AtomicU64>,
}

impl MockTokenSigner {
    fn sign(&self, kind: TokenKind, user_id: UserId, email: &Email) -> String {
        let serial = self.serial.fetch_add(1, Ordering::SeqCst);
        format!("{kind}|{user_id}|{}|{serial}", email.as_str())
    }
}

impl TokenSigner for MockTokenSigner {
    fn issue_access(&self, user_id: UserId, email: &Email) -> Result<AccessToken, TokenError> {
        Ok(AccessToken::from(self.sign(TokenKind::Access, user_id, email)))
    }

    fn issue_refresh(&self, user_id: UserId, email: &Email) -> Result<RefreshToken, TokenError> {
        Ok(RefreshToken::from(self.sign(TokenKind::Refresh, user_id, email)))
    }

    fn issue_reset(&self, user_id: UserId, email: &Email) -> Result<ResetToken, TokenError> {
        Ok(ResetToken::from(self.sign(TokenKind::Reset, user_id, email)))
    }

    fn validate(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError> {
        let parts: Vec<&str> = token.split('|').collect();
        let [kind, user_id, email, _serial] = parts.as_slice() else {
            return Err(TokenError::Malformed);
        };
        let found = match *kind {
            "access" => TokenKind::Access,
            "refresh" => TokenKind::Refresh,
            "reset" => TokenKind::Reset,
            _ => return Err(TokenError::Malformed),
        };
        if found != expected {
            return Err(TokenError::WrongKind { expected, found });
        }
        let now = Utc::now();
        Ok(TokenClaims {
            user_id: user_id.parse().map_err(|_| TokenError::Malformed)?,
            email: (*email).to_owned(),
            kind: found,
            issuer: "test".to_owned(),
            issued_at: now,
            not_before: now,
            expires_at: now + Duration::minutes(15),
        })
    }

    fn access_time_to_live(&self) -> Duration {
        Duration::minutes(15)
    }

    fn refresh_time_to_live(&self) -> Duration {
        Duration::days(7)
    }
}

/// Signer that can still validate but fails to issue refresh and reset tokens.
#[derive(Clone, Default)]
pub struct BrokenSigner {
    inner: MockTokenSigner,
}

impl TokenSigner for BrokenSigner {
    fn issue_access(&self, user_id: UserId, email: &Email) -> Result<AccessToken, TokenError> {
        self.inner.issue_access(user_id, email)
    }

    fn issue_refresh(&self, _user_id: UserId, _email: &Email) -> Result<RefreshToken, TokenError> {
        Err(TokenError::SigningFailure("key unavailable".to_owned()))
    }

    fn issue_reset(&self, _user_id: UserId, _email: &Email) -> Result<ResetToken, TokenError> {
        Err(TokenError::SigningFailure("key unavailable".to_owned()))
    }

    fn validate(&self, token: &str, expected: TokenKind) -> Result<TokenClaims, TokenError> {
        self.inner.validate(token, expected)
    }

    fn access_time_to_live(&self) -> Duration {
        self.inner.access_time_to_live()
    }

    fn refresh_time_to_live(&self) -> Duration {
        self.inner.refresh_time_to_live()
    }
}

#[derive(Clone, Default)]
pub struct MockEmailClient {
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        _subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("smtp unavailable".to_owned());
        }
        self.sent
            .write()
            .await
            .push((recipient.as_str().to_owned(), content.to_owned()));
        Ok(())
    }
}

pub fn token_in(content: &str) -> ResetToken {
    let (_, token) = content
        .split_once("token=")
        .expect("reset link carries a token");
    ResetToken::from(token.to_owned())
}

pub fn refresh_hash(token: &RefreshToken) -> TokenHash {
    TokenHash::of(token.as_str())
}

/// Collects formatted log output for the duration of a test.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Routes `tracing` events on this thread into the buffer until the guard drops.
    pub fn capture(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
