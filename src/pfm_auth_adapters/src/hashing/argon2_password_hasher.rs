use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use pfm_auth_core::{
    HashedPassword, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, Password, PasswordHashError,
    PasswordHasher,
};
use secrecy::{ExposeSecret, Secret};

/// Argon2id hasher producing PHC strings.
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    memory_cost_in_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::with_params(15000, 2, 1)
    }
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use cheaper parameters in tests only. Existing hashes carry their own
    /// parameters and still verify.
    pub fn with_params(memory_cost_in_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_cost_in_kib,
            iterations,
            parallelism,
        }
    }

    fn params(&self) -> Result<Params, PasswordHashError> {
        Params::new(
            self.memory_cost_in_kib,
            self.iterations,
            self.parallelism,
            None,
        )
        .map_err(|e| PasswordHashError::HashingFailure(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
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

        let params = self.params()?;
        let password = password.clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| HashedPassword::new(Secret::from(h.to_string())))
                    .map_err(|e| PasswordHashError::HashingFailure(e.to_string()))
            })
        })
        .await
        .map_err(|e| PasswordHashError::HashingFailure(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(
        &self,
        password: &Password,
        hash: &HashedPassword,
    ) -> Result<(), PasswordHashError> {
        let password = password.clone();
        let expected = hash.clone();
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(expected.as_ref().expose_secret())
                    .map_err(|e| e.to_string())?;

                // Parameters are read from the PHC string.
                Argon2::default()
                    .verify_password(password.as_ref().expose_secret().as_bytes(), &expected)
                    .map_err(|e| e.to_string())
            })
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Password verification failed");
                Err(PasswordHashError::Mismatch)
            }
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                Err(PasswordHashError::Mismatch)
            }
        }
    }
}
