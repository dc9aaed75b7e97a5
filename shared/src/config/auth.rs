//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// Access and refresh tokens are signed with independent secrets so a
/// leaked access secret cannot be used to mint refresh tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing access tokens
    pub access_secret: String,

    /// Secret key for signing refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("access-secret-change-in-production"),
            refresh_secret: String::from("refresh-secret-change-in-production"),
            access_token_expiry: 7 * 24 * 3600, // 7 days
            refresh_token_expiry: 12 * 3600,    // 12 hours
            issuer: String::from("school-mgmt"),
            audience: String::from("school-mgmt-api"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with explicit secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in hours
    pub fn with_refresh_expiry_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiry = hours * 3600;
        self
    }

    /// Check if using default secrets (security warning)
    pub fn is_using_default_secrets(&self) -> bool {
        self.access_secret == "access-secret-change-in-production"
            || self.refresh_secret == "refresh-secret-change-in-production"
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Email of the distinguished super admin identity
    ///
    /// The super admin bypasses tenant scoping for school-management
    /// endpoints only; every other endpoint treats it as a regular user.
    pub super_admin_email: String,

    /// Bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            super_admin_email: String::from("superadmin@school-mgmt.local"),
            bcrypt_cost: 12,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .unwrap_or_else(|_| "access-secret-change-in-production".to_string());
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .unwrap_or_else(|_| "refresh-secret-change-in-production".to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "43200".to_string())
            .parse()
            .unwrap_or(43200);
        let super_admin_email = std::env::var("SUPER_ADMIN_EMAIL")
            .unwrap_or_else(|_| "superadmin@school-mgmt.local".to_string());
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "12".to_string())
            .parse()
            .unwrap_or(12);

        Self {
            jwt: JwtConfig {
                access_secret,
                refresh_secret,
                access_token_expiry,
                refresh_token_expiry,
                issuer: String::from("school-mgmt"),
                audience: String::from("school-mgmt-api"),
            },
            super_admin_email,
            bcrypt_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 604800);
        assert_eq!(config.refresh_token_expiry, 43200);
        assert!(config.is_using_default_secrets());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("access", "refresh")
            .with_access_expiry_minutes(15)
            .with_refresh_expiry_hours(24);

        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 86400);
        assert!(!config.is_using_default_secrets());
    }

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.super_admin_email, "superadmin@school-mgmt.local");
    }
}
