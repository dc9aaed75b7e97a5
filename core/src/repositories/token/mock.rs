//! In-memory implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository backed by a HashMap keyed on record id
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<Uuid, RefreshTokenRecord>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records currently stored, revoked or not
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id) {
            return Err(DomainError::Validation {
                message: "Token record already exists".to_string(),
            });
        }

        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_refresh_token(
        &self,
        id: Uuid,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn rotate_refresh_token(
        &self,
        old_id: Uuid,
        replacement: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        // Single write lock stands in for the SQL transaction.
        let mut records = self.records.write().await;

        if records.remove(&old_id).is_none() {
            return Err(DomainError::not_found("refresh token"));
        }

        records.insert(replacement.id, replacement.clone());
        Ok(replacement)
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let mut count = 0;

        for record in records.values_mut() {
            if record.user_id == user_id && !record.is_revoked {
                record.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| !record.is_expired());

        Ok(initial_count - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: Uuid) -> RefreshTokenRecord {
        RefreshTokenRecord::new(Uuid::new_v4(), user_id, "hash".to_string(), 3600)
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_id() {
        let repo = MockTokenRepository::new();
        let rec = record(Uuid::new_v4());

        repo.save_refresh_token(rec.clone()).await.unwrap();
        assert!(repo.save_refresh_token(rec).await.is_err());
    }

    #[tokio::test]
    async fn test_rotate_removes_old_and_inserts_new() {
        let repo = MockTokenRepository::new();
        let user_id = Uuid::new_v4();
        let old = repo.save_refresh_token(record(user_id)).await.unwrap();
        let new = record(user_id);

        repo.rotate_refresh_token(old.id, new.clone()).await.unwrap();

        assert!(repo.find_refresh_token(old.id).await.unwrap().is_none());
        assert!(repo.find_refresh_token(new.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rotate_fails_when_old_missing() {
        let repo = MockTokenRepository::new();
        let result = repo
            .rotate_refresh_token(Uuid::new_v4(), record(Uuid::new_v4()))
            .await;
        assert!(result.is_err());
        // Nothing was inserted on failure.
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_revoke_all_is_idempotent() {
        let repo = MockTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save_refresh_token(record(user_id)).await.unwrap();
        repo.save_refresh_token(record(user_id)).await.unwrap();

        assert_eq!(repo.revoke_all_user_tokens(user_id).await.unwrap(), 2);
        assert_eq!(repo.revoke_all_user_tokens(user_id).await.unwrap(), 0);
    }
}
