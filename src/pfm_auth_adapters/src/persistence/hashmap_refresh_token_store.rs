use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use pfm_auth_core::{
    RefreshTokenRecord, RefreshTokenStore, RefreshTokenStoreError, TokenHash, UserId,
};
use tokio::sync::RwLock;

#[derive(Default, Clone)]
pub struct HashMapRefreshTokenStore {
    records: Arc<RwLock<HashMap<TokenHash, RefreshTokenRecord>>>,
}

impl HashMapRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, valid or not.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for HashMapRefreshTokenStore {
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
        let now = Utc::now();
        self.records
            .read()
            .await
            .get(token_hash)
            .filter(|record| record.is_valid_at(now))
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
        let mut records = self.records.write().await;
        let mut revoked = 0;
        for record in records
            .values_mut()
            .filter(|record| &record.user_id == user_id && !record.revoked)
        {
            record.revoked = true;
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn delete_expired(&self) -> Result<u64, RefreshTokenStoreError> {
        let now = Utc::now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.expires_at > now);
        Ok((before - records.len()) as u64)
    }
}
