//! Domain-specific error types for authentication and token operations
//!
//! Presentation-layer concerns (status codes, response bodies) are handled
//! at the API boundary; these enums only name what went wrong.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Email already in use")]
    EmailAlreadyInUse,

    #[error("School name already in use")]
    SchoolNameAlreadyInUse,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Password hashing failed")]
    PasswordHashingFailed,
}

/// Token-related errors
///
/// The API layer collapses every variant into one uniform unauthorized
/// response so a caller cannot tell which check failed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Unknown refresh token")]
    UnknownToken,

    #[error("Refresh token does not match stored record")]
    TokenMismatch,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
