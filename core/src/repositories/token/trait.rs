//! Token repository trait defining the interface for the refresh-token
//! whitelist.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for the refresh-token whitelist
///
/// Tokens are stored hashed; a record is addressed by its id, which is the
/// `jti` claim of the token it backs.
///
/// # Security Considerations
/// - Raw token strings must never reach the store
/// - Rotation must be atomic: at no point may both the old and the new
///   record be live
/// - Expired records should be cleaned up periodically
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new whitelist record
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate id)
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a whitelist record by its id (`jti`)
    async fn find_refresh_token(
        &self,
        id: Uuid,
    ) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Atomically replace one record with another
    ///
    /// Deletes the record identified by `old_id` and inserts `replacement`
    /// as a single transaction, so a stolen old token and its replacement
    /// are never honored simultaneously.
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The stored replacement
    /// * `Err(DomainError)` - The old record was missing or the store failed;
    ///   nothing was changed
    async fn rotate_refresh_token(
        &self,
        old_id: Uuid,
        replacement: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Revoke every non-revoked record owned by a user
    ///
    /// Idempotent: revoking an already-revoked set is a no-op.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records newly revoked
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete expired records from the store
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired_tokens(&self) -> Result<usize, DomainError>;
}
