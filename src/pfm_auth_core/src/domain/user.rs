use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{email::Email, password::HashedPassword, user_id::UserId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A freshly registered, active user.
    pub fn new(
        email: Email,
        password_hash: HashedPassword,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email,
            password_hash,
            first_name,
            last_name,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn set_password_hash(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
