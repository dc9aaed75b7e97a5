//! End-to-end authentication flow tests against the in-memory repositories.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::user::Role;
use crate::domain::value_objects::IdentityContext;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockSchoolRepository, MockTokenRepository, MockUserRepository};
use crate::services::auth::{AuthService, RegisterSchoolData};
use crate::services::password::PasswordHasher;
use crate::services::policy::PolicyGate;
use crate::services::token::{TokenService, TokenServiceConfig};

const SUPER_ADMIN: &str = "root@school-mgmt.local";

type TestAuthService = AuthService<MockUserRepository, MockSchoolRepository, MockTokenRepository>;

struct Fixture {
    auth: TestAuthService,
    tokens: Arc<TokenService<MockTokenRepository>>,
}

fn fixture() -> Fixture {
    let tokens = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_token_expiry_seconds: 900,
            refresh_token_expiry_seconds: 3600,
        },
    ));
    let auth = AuthService::new(
        Arc::new(MockUserRepository::new()),
        Arc::new(MockSchoolRepository::new()),
        Arc::clone(&tokens),
        PasswordHasher::new(4),
        Arc::new(PolicyGate::new(SUPER_ADMIN)),
    );
    Fixture { auth, tokens }
}

fn registration(email: &str, name: &str) -> RegisterSchoolData {
    RegisterSchoolData {
        email: email.to_string(),
        password: "hunter2hunter2".to_string(),
        name: name.to_string(),
        address: None,
        phone: None,
        website: None,
    }
}

impl Fixture {
    /// Registers a school and returns the admin's identity context.
    async fn register_identity(&self, email: &str, name: &str) -> IdentityContext {
        let pair = self.auth.register(registration(email, name)).await.unwrap();
        let claims = self.tokens.verify_access_token(&pair.access_token).unwrap();
        IdentityContext::from_claims(claims).unwrap()
    }
}

#[tokio::test]
async fn test_login_after_register_round_trip() {
    let f = fixture();
    f.auth
        .register(registration("admin@greenfield.edu", "Greenfield High"))
        .await
        .unwrap();

    let pair = f
        .auth
        .login("admin@greenfield.edu", "hunter2hunter2")
        .await
        .unwrap();

    let claims = f.tokens.verify_access_token(&pair.access_token).unwrap();
    assert_eq!(claims.email, "admin@greenfield.edu");
    assert_eq!(claims.role, Role::Admin);
}

#[tokio::test]
async fn test_register_rejects_taken_school_name() {
    let f = fixture();
    f.auth
        .register(registration("a@one.edu", "Shared Name"))
        .await
        .unwrap();

    let result = f.auth.register(registration("b@two.edu", "Shared Name")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::SchoolNameAlreadyInUse))
    ));
}

#[tokio::test]
async fn test_register_rejects_taken_email() {
    let f = fixture();
    f.auth
        .register(registration("same@user.edu", "First School"))
        .await
        .unwrap();

    let result = f
        .auth
        .register(registration("same@user.edu", "Second School"))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailAlreadyInUse))
    ));
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let f = fixture();
    f.auth
        .register(registration("admin@s.edu", "Some School"))
        .await
        .unwrap();

    let unknown = f.auth.login("nobody@s.edu", "hunter2hunter2").await;
    let wrong_password = f.auth.login("admin@s.edu", "wrong-password").await;

    for result in [unknown, wrong_password] {
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }
}

#[tokio::test]
async fn test_refresh_rotation_is_single_use() {
    let f = fixture();
    let pair = f
        .auth
        .register(registration("admin@s.edu", "Rotating School"))
        .await
        .unwrap();

    let rotated = f.auth.refresh_token(&pair.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);

    // Second exchange with the consumed token must fail.
    let replay = f.auth.refresh_token(&pair.refresh_token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::UnknownToken))
    ));

    // The replacement keeps working.
    assert!(f.auth.refresh_token(&rotated.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revocation_defeats_outstanding_refresh_tokens() {
    let f = fixture();
    let pair = f
        .auth
        .register(registration("admin@s.edu", "Revoked School"))
        .await
        .unwrap();
    let identity = {
        let claims = f.tokens.verify_access_token(&pair.access_token).unwrap();
        IdentityContext::from_claims(claims).unwrap()
    };

    let revoked = f.auth.revoke_tokens(&identity, identity.user_id).await.unwrap();
    assert_eq!(revoked, 1);

    // The refresh token is cryptographically fine but its record is revoked.
    let result = f.auth.refresh_token(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenRevoked))
    ));

    // Idempotent: nothing left to revoke, no error.
    let again = f.auth.revoke_tokens(&identity, identity.user_id).await.unwrap();
    assert_eq!(again, 0);
}

#[tokio::test]
async fn test_revocation_is_gated_to_self_or_super_admin() {
    let f = fixture();
    let alice = f.register_identity("alice@one.edu", "School One").await;
    let bob = f.register_identity("bob@two.edu", "School Two").await;

    // A regular user cannot revoke someone else's tokens.
    let result = f.auth.revoke_tokens(&alice, bob.user_id).await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));

    // The super admin can.
    let root = f.register_identity(SUPER_ADMIN, "Head Office").await;
    assert!(f.auth.revoke_tokens(&root, bob.user_id).await.is_ok());
}

#[tokio::test]
async fn test_revoke_requires_matching_target() {
    let f = fixture();
    let identity = f.register_identity("solo@s.edu", "Solo School").await;

    // Different target user: gated before any store access.
    let result = f.auth.revoke_tokens(&identity, Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));
}
