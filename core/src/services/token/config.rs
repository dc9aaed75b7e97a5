//! Configuration for the token service

/// Configuration for the token service
///
/// Access and refresh tokens use independent signing secrets.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing access tokens
    pub access_secret: String,
    /// Secret for signing refresh tokens
    pub refresh_secret: String,
    /// Access token expiry in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "access-secret-change-in-production".to_string(),
            refresh_secret: "refresh-secret-change-in-production".to_string(),
            access_token_expiry_seconds: 7 * 24 * 3600,
            refresh_token_expiry_seconds: 12 * 3600,
        }
    }
}

impl From<&sm_shared::config::AuthConfig> for TokenServiceConfig {
    fn from(config: &sm_shared::config::AuthConfig) -> Self {
        Self {
            access_secret: config.jwt.access_secret.clone(),
            refresh_secret: config.jwt.refresh_secret.clone(),
            access_token_expiry_seconds: config.jwt.access_token_expiry,
            refresh_token_expiry_seconds: config.jwt.refresh_token_expiry,
        }
    }
}
