use secrecy::{ExposeSecret, Secret};

use super::password_policy::{PasswordStrengthReport, evaluate_strength};

pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Upper bound on plaintext length accepted for hashing. Longer inputs are
/// rejected instead of being truncated.
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Plaintext password as submitted by a caller.
///
/// Construction never fails: login must accept whatever the caller typed.
/// Strength is evaluated separately with [`Password::strength`].
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn char_count(&self) -> usize {
        self.0.expose_secret().chars().count()
    }

    pub fn strength(&self) -> PasswordStrengthReport {
        evaluate_strength(self.0.expose_secret())
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl From<Secret<String>> for Password {
    fn from(value: Secret<String>) -> Self {
        Self(value)
    }
}

/// One-way, salted hash of a password in PHC string format.
#[derive(Debug, Clone)]
pub struct HashedPassword(Secret<String>);

impl HashedPassword {
    pub fn new(phc: Secret<String>) -> Self {
        Self(phc)
    }
}

impl AsRef<Secret<String>> for HashedPassword {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
