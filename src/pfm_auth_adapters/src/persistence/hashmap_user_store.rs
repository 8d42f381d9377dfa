use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use pfm_auth_core::{Email, User, UserId, UserStore, UserStoreError};

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<Email, UserId>,
}

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn create(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.id_by_email.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.id_by_email.insert(user.email.clone(), user.id);
        users.by_id.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .get(id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .id_by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn update(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let Users { by_id, id_by_email } = &mut *users;

        let stored = by_id.get_mut(&user.id).ok_or(UserStoreError::UserNotFound)?;
        if stored.email != user.email {
            if id_by_email.contains_key(&user.email) {
                return Err(UserStoreError::UserAlreadyExists);
            }
            id_by_email.remove(&stored.email);
            id_by_email.insert(user.email.clone(), user.id);
        }
        *stored = user.clone();
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        Ok(self.users.read().await.id_by_email.contains_key(email))
    }
}
