//! Token service behavior tests against the in-memory repository.

use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, TokenRepository};
use crate::services::token::{TokenService, TokenServiceConfig};

fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_token_expiry_seconds: 900,
        refresh_token_expiry_seconds: 3600,
    }
}

fn service() -> TokenService<MockTokenRepository> {
    TokenService::new(MockTokenRepository::new(), test_config())
}

fn sample_user() -> User {
    User::new(
        "admin@greenfield.edu".to_string(),
        "$2b$12$hash".to_string(),
        Role::Admin,
        Uuid::new_v4(),
    )
}

#[tokio::test]
async fn test_issue_then_verify_reproduces_identity_claims() {
    let service = service();
    let user = sample_user();

    let pair = service.issue_tokens(&user).await.unwrap();
    let claims = service.verify_access_token(&pair.access_token).unwrap();

    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.school_id, user.school_id);
}

#[tokio::test]
async fn test_access_token_rejected_by_wrong_secret() {
    let issuing = service();
    let verifying = TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            access_secret: "a-different-secret".to_string(),
            ..test_config()
        },
    );
    let pair = issuing.issue_tokens(&sample_user()).await.unwrap();

    let result = verifying.verify_access_token(&pair.access_token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[tokio::test]
async fn test_access_token_is_not_a_valid_refresh_token() {
    let service = service();
    let pair = service.issue_tokens(&sample_user()).await.unwrap();

    // Signed with the access secret, so the refresh verifier must reject it.
    let result = service.verify_refresh_token(&pair.access_token).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_expired_access_token_rejected() {
    // Negative expiry beats the decoder's default leeway.
    let service = TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            access_token_expiry_seconds: -120,
            ..test_config()
        },
    );
    let user = sample_user();
    let pair = service.issue_tokens(&user).await.unwrap();

    let result = service.verify_access_token(&pair.access_token);
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[tokio::test]
async fn test_refresh_token_verifies_against_whitelist() {
    let service = service();
    let user = sample_user();
    let pair = service.issue_tokens(&user).await.unwrap();

    let (claims, record) = service.verify_refresh_token(&pair.refresh_token).await.unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(record.user_id, user.id);
    assert_eq!(record.id.to_string(), claims.jti);
}

#[tokio::test]
async fn test_rotation_is_single_use() {
    let service = service();
    let user = sample_user();
    let pair = service.issue_tokens(&user).await.unwrap();

    let (_, record) = service.verify_refresh_token(&pair.refresh_token).await.unwrap();
    let rotated = service.rotate_tokens(&record, &user).await.unwrap();

    // The new refresh token is live.
    assert!(service.verify_refresh_token(&rotated.refresh_token).await.is_ok());

    // Replaying the rotated-out token fails: its record is gone.
    let replay = service.verify_refresh_token(&pair.refresh_token).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::UnknownToken))
    ));
}

#[tokio::test]
async fn test_stale_token_with_reused_record_id_is_rejected() {
    let service = service();
    let user = sample_user();
    let pair = service.issue_tokens(&user).await.unwrap();
    let (_, record) = service.verify_refresh_token(&pair.refresh_token).await.unwrap();

    // Simulate the record being replaced under the same id with a
    // different hash; the still-validly-signed old token must not pass.
    let mut replacement = record.clone();
    replacement.token_hash = "somebody-elses-hash".to_string();
    service
        .repository
        .rotate_refresh_token(record.id, replacement)
        .await
        .unwrap();

    let result = service.verify_refresh_token(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::TokenMismatch))
    ));
}

#[tokio::test]
async fn test_revoke_all_defeats_outstanding_tokens() {
    let service = service();
    let user = sample_user();
    let first = service.issue_tokens(&user).await.unwrap();
    let second = service.issue_tokens(&user).await.unwrap();

    let revoked = service.revoke_all_tokens(user.id).await.unwrap();
    assert_eq!(revoked, 2);

    for token in [&first.refresh_token, &second.refresh_token] {
        let result = service.verify_refresh_token(token).await;
        assert!(matches!(
            result,
            Err(DomainError::Token(TokenError::TokenRevoked))
        ));
    }
}

#[tokio::test]
async fn test_revoke_all_is_idempotent() {
    let service = service();
    let user = sample_user();
    service.issue_tokens(&user).await.unwrap();

    assert_eq!(service.revoke_all_tokens(user.id).await.unwrap(), 1);
    assert_eq!(service.revoke_all_tokens(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_garbage_refresh_token_rejected() {
    let service = service();
    let result = service.verify_refresh_token("not.a.jwt").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}
