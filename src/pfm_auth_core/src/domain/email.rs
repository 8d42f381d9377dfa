use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
});

/// A syntactically valid email address.
///
/// Compared exactly as stored: `Alice@x.com` and `alice@x.com` are two emails.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let trimmed = value.expose_secret().trim();
        if EMAIL_PATTERN.is_match(trimmed) {
            Ok(Self(Secret::from(trimmed.to_owned())))
        } else {
            Err(UserError::InvalidEmail)
        }
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
