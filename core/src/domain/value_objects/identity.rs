//! Request-scoped identity derived from a verified access token.

use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};

/// Identity of the caller for the duration of one request
///
/// Built from verified access-token claims by the auth gate; never
/// persisted. Every protected handler consults this before touching
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    /// User ID of the caller
    pub user_id: Uuid,

    /// Login email of the caller
    pub email: String,

    /// Role of the caller
    pub role: Role,

    /// School (tenant) of the caller
    pub school_id: Uuid,

    /// JWT ID of the presented token
    pub jti: String,
}

impl IdentityContext {
    /// Builds an identity context from verified claims
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            email: claims.email,
            role: claims.role,
            school_id: claims.school_id,
            jti: claims.jti,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::User;

    #[test]
    fn test_from_claims() {
        let user = User::new(
            "student@school.edu".to_string(),
            "hash".to_string(),
            Role::Student,
            Uuid::new_v4(),
        );
        let claims = Claims::new_access_token(&user, 900);
        let identity = IdentityContext::from_claims(claims).unwrap();

        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.role, Role::Student);
        assert_eq!(identity.school_id, user.school_id);
    }

    #[test]
    fn test_from_claims_rejects_bad_subject() {
        let user = User::new(
            "x@y.edu".to_string(),
            "hash".to_string(),
            Role::Admin,
            Uuid::new_v4(),
        );
        let mut claims = Claims::new_access_token(&user, 900);
        claims.sub = "not-a-uuid".to_string();

        assert!(IdentityContext::from_claims(claims).is_err());
    }
}
