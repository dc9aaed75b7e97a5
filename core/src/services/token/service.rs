//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha512};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshTokenRecord, TokenPair, JWT_AUDIENCE, JWT_ISSUER};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for issuing, verifying, rotating, and revoking token pairs
///
/// Access tokens are verified purely cryptographically; refresh tokens are
/// additionally checked against the server-side whitelist kept by the
/// repository.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    config: TokenServiceConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let access_encoding_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
            validation,
        }
    }

    /// Issues a fresh (access, refresh) pair for a user
    ///
    /// Stores the hashed refresh token in the whitelist before returning.
    pub async fn issue_tokens(&self, user: &User) -> DomainResult<TokenPair> {
        let access_token = self.generate_access_token(user)?;
        let (refresh_token, record) = self.generate_refresh_token(user)?;

        self.repository
            .save_refresh_token(record)
            .await
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Verifies an access token and returns the claims
    ///
    /// Pure given the configured secret and the clock; no I/O.
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.access_decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        Ok(token_data.claims)
    }

    /// Verifies a refresh token cryptographically and against the whitelist
    ///
    /// The record backing the token is looked up by the `jti` claim; the
    /// record must exist, be non-revoked, and its stored hash must match
    /// the hash of the presented token. The last check defends against a
    /// validly-signed token whose record was already rotated out and
    /// replaced under the same id.
    pub async fn verify_refresh_token(
        &self,
        token: &str,
    ) -> DomainResult<(Claims, RefreshTokenRecord)> {
        let token_data = decode::<Claims>(token, &self.refresh_decoding_key, &self.validation)
            .map_err(map_decode_error)?;
        let claims = token_data.claims;

        let record_id = Uuid::parse_str(&claims.jti)
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;

        let record = self
            .repository
            .find_refresh_token(record_id)
            .await?
            .ok_or(DomainError::Token(TokenError::UnknownToken))?;

        if record.is_revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }
        if record.is_expired() {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }
        if hash_token(token) != record.token_hash {
            return Err(DomainError::Token(TokenError::TokenMismatch));
        }

        Ok((claims, record))
    }

    /// Rotates a verified refresh token into a brand-new pair
    ///
    /// The old whitelist record and the new one swap in a single atomic
    /// repository operation, so the rotated-out token can never be honored
    /// alongside its replacement. Replaying the old token afterwards fails
    /// with an unknown-token error, which is how theft after a legitimate
    /// rotation is detected.
    pub async fn rotate_tokens(
        &self,
        old_record: &RefreshTokenRecord,
        user: &User,
    ) -> DomainResult<TokenPair> {
        let access_token = self.generate_access_token(user)?;
        let (refresh_token, record) = self.generate_refresh_token(user)?;

        self.repository
            .rotate_refresh_token(old_record.id, record)
            .await?;

        tracing::debug!(user_id = %user.id, "refresh token rotated");

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Revokes every outstanding refresh token of a user
    ///
    /// Idempotent. Already-issued access tokens stay valid until natural
    /// expiry; this is a documented limitation of the scheme.
    pub async fn revoke_all_tokens(&self, user_id: Uuid) -> DomainResult<usize> {
        let count = self.repository.revoke_all_user_tokens(user_id).await?;
        tracing::info!(%user_id, count, "revoked refresh tokens");
        Ok(count)
    }

    /// Removes expired whitelist records
    pub async fn cleanup_expired_tokens(&self) -> DomainResult<usize> {
        self.repository.delete_expired_tokens().await
    }

    fn generate_access_token(&self, user: &User) -> DomainResult<String> {
        let claims = Claims::new_access_token(user, self.config.access_token_expiry_seconds);
        encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Builds a refresh token plus the whitelist record backing it
    fn generate_refresh_token(
        &self,
        user: &User,
    ) -> DomainResult<(String, RefreshTokenRecord)> {
        let jti = Uuid::new_v4();
        let claims = Claims::new_refresh_token(
            user,
            self.config.refresh_token_expiry_seconds,
            jti.to_string(),
        );
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        let record = RefreshTokenRecord::new(
            jti,
            user.id,
            hash_token(&token),
            self.config.refresh_token_expiry_seconds,
        );

        Ok((token, record))
    }
}

/// Hashes a raw token string for whitelist storage
pub(crate) fn hash_token(token: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn map_decode_error(error: jsonwebtoken::errors::Error) -> DomainError {
    match error.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            DomainError::Token(TokenError::TokenExpired)
        }
        jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
            DomainError::Token(TokenError::TokenNotYetValid)
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            DomainError::Token(TokenError::InvalidSignature)
        }
        _ => DomainError::Token(TokenError::InvalidTokenFormat),
    }
}
