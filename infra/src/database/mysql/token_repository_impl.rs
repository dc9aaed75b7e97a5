//! MySQL implementation of the TokenRepository trait.
//!
//! Persists the refresh-token whitelist. Rotation runs inside a SQL
//! transaction so the old and the new record are never live together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sm_core::domain::entities::token::RefreshTokenRecord;
use sm_core::errors::DomainError;
use sm_core::repositories::TokenRepository;

use super::db_error;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_error("Failed to get user_id", e))?;

        Ok(RefreshTokenRecord {
            id: Uuid::parse_str(&id).map_err(|e| db_error("Invalid token UUID", e))?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| db_error("Invalid user UUID", e))?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| db_error("Failed to get token_hash", e))?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| db_error("Failed to get is_revoked", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| db_error("Failed to get expires_at", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, is_revoked, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token_hash)
            .bind(record.is_revoked)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save refresh token", e))?;

        Ok(record)
    }

    async fn find_refresh_token(
        &self,
        id: Uuid,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, is_revoked, created_at, expires_at
            FROM refresh_tokens
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn rotate_refresh_token(
        &self,
        old_id: Uuid,
        replacement: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin rotation transaction", e))?;

        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE id = ?")
            .bind(old_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete rotated token", e))?;

        if deleted.rows_affected() == 0 {
            // Old record already gone: rolled back implicitly on drop.
            return Err(DomainError::not_found("refresh token"));
        }

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, is_revoked, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(replacement.id.to_string())
        .bind(replacement.user_id.to_string())
        .bind(&replacement.token_hash)
        .bind(replacement.is_revoked)
        .bind(replacement.created_at)
        .bind(replacement.expires_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to store replacement token", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit rotation", e))?;

        Ok(replacement)
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE user_id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to revoke user tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete expired tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
