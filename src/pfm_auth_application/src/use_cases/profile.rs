use chrono::Utc;
use pfm_auth_core::{UserId, UserStore, UserStoreError};

use crate::responses::UserProfile;

/// Partial profile update; empty or absent names are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    PersistenceFailure(UserStoreError),
}

impl From<UserStoreError> for ProfileError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => Self::UserNotFound,
            other => Self::PersistenceFailure(other),
        }
    }
}

pub struct ProfileUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> ProfileUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ProfileUseCase::get", skip(self))]
    pub async fn get(&self, user_id: UserId) -> Result<UserProfile, ProfileError> {
        let user = self.user_store.find_by_id(&user_id).await?;
        Ok(UserProfile::from(&user))
    }

    #[tracing::instrument(name = "ProfileUseCase::update", skip(self, request))]
    pub async fn update(
        &self,
        user_id: UserId,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, ProfileError> {
        let mut user = self.user_store.find_by_id(&user_id).await?;

        if let Some(first_name) = non_empty(request.first_name) {
            user.first_name = first_name;
        }
        if let Some(last_name) = non_empty(request.last_name) {
            user.last_name = last_name;
        }
        user.updated_at = Utc::now();

        self.user_store.update(&user).await?;
        Ok(UserProfile::from(&user))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
