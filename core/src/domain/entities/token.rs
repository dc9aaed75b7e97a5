//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Role, User};

/// JWT issuer
pub const JWT_ISSUER: &str = "school-mgmt";

/// JWT audience
pub const JWT_AUDIENCE: &str = "school-mgmt-api";

/// Claims structure for JWT payload
///
/// Access and refresh tokens carry the same claim set; the `jti` of a
/// refresh token doubles as the identifier of its whitelist record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Login email of the subject
    pub email: String,

    /// Role of the subject
    pub role: Role,

    /// School (tenant) the subject belongs to
    pub school_id: Uuid,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(user: &User, expiry_seconds: i64) -> Self {
        Self::new(user, expiry_seconds, Uuid::new_v4().to_string())
    }

    /// Creates new claims for a refresh token
    ///
    /// The `jti` must be the id of the whitelist record that will back
    /// this token, generated per issuance.
    pub fn new_refresh_token(user: &User, expiry_seconds: i64, jti: String) -> Self {
        Self::new(user, expiry_seconds, jti)
    }

    fn new(user: &User, expiry_seconds: i64, jti: String) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(expiry_seconds);

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            school_id: user.school_id,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token whitelist record stored in the database
///
/// The record id equals the `jti` claim of the refresh token it backs,
/// so a cryptographically valid token can be matched to exactly one
/// record. Only the SHA-512 hash of the raw token string is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier, equal to the token's `jti` claim
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// SHA-512 hash of the raw token string
    pub token_hash: String,

    /// Whether the token has been revoked
    pub is_revoked: bool,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a new whitelist record
    pub fn new(id: Uuid, user_id: Uuid, token_hash: String, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            token_hash,
            is_revoked: false,
            created_at: now,
            expires_at: now + Duration::seconds(expiry_seconds),
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the record is usable (not expired and not revoked)
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Revokes the record
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "teacher@greenfield.edu".to_string(),
            "$2b$12$hash".to_string(),
            Role::Teacher,
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_access_token_claims() {
        let user = sample_user();
        let claims = Claims::new_access_token(&user, 900);

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.school_id, user.school_id);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_token_claims_carry_given_jti() {
        let user = sample_user();
        let jti = Uuid::new_v4();
        let claims = Claims::new_refresh_token(&user, 3600, jti.to_string());

        assert_eq!(claims.jti, jti.to_string());
        assert_eq!(claims.user_id().unwrap(), user.id);
    }

    #[test]
    fn test_claims_expiration() {
        let user = sample_user();
        let mut claims = Claims::new_access_token(&user, 900);

        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_record_creation_and_revocation() {
        let id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let mut record = RefreshTokenRecord::new(id, user_id, "hash".to_string(), 3600);

        assert_eq!(record.id, id);
        assert!(record.is_valid());

        record.revoke();

        assert!(record.is_revoked);
        assert!(!record.is_valid());
    }

    #[test]
    fn test_record_expiration() {
        let mut record =
            RefreshTokenRecord::new(Uuid::new_v4(), Uuid::new_v4(), "hash".to_string(), 3600);
        record.expires_at = Utc::now() - Duration::days(1);

        assert!(record.is_expired());
        assert!(!record.is_valid());
    }

    #[test]
    fn test_claims_serialization_round_trip() {
        let user = sample_user();
        let claims = Claims::new_access_token(&user, 900);

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
