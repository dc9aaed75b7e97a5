//! End-to-end authentication flow over HTTP: register, login, rotate,
//! replay, revoke.

mod common;

use actix_web::{http::StatusCode, test};

use common::{register_payload, test_state};
use sm_api::app::create_app;

#[actix_web::test]
async fn test_register_login_and_refresh_flow() {
    let state = test_state();
    let app = test::init_service(create_app(state)).await;

    // Register a school; response carries the token pair.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(register_payload("admin@greenfield.edu", "Greenfield High"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let refresh0 = body["refreshToken"].as_str().unwrap().to_string();
    assert!(body["accessToken"].as_str().is_some());

    // Login with the same credentials.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({
                "email": "admin@greenfield.edu",
                "password": "correct-horse-battery",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Exchange the original refresh token.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/refreshToken")
            .set_json(serde_json::json!({ "refreshToken": refresh0 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let rotated: serde_json::Value = test::read_body_json(resp).await;
    let refresh1 = rotated["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(refresh0, refresh1);

    // Replaying the consumed token must be rejected.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/refreshToken")
            .set_json(serde_json::json!({ "refreshToken": refresh0 }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_with_wrong_password_is_forbidden() {
    let state = test_state();
    let app = test::init_service(create_app(state)).await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(register_payload("admin@s.edu", "Some School"))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/login")
            .set_json(serde_json::json!({
                "email": "admin@s.edu",
                "password": "not-the-password",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_duplicate_registration_is_rejected() {
    let state = test_state();
    let app = test::init_service(create_app(state)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(register_payload("admin@s.edu", "Twin School"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(register_payload("other@s.edu", "Twin School"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_register_validation_failure_is_bad_request() {
    let state = test_state();
    let app = test::init_service(create_app(state)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(serde_json::json!({
                "email": "not-an-email",
                "password": "pw",
                "name": "X",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_revocation_endpoint_is_gated() {
    let state = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    // Two unrelated admins.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(register_payload("alice@one.edu", "School One"))
            .to_request(),
    )
    .await;
    let alice: serde_json::Value = test::read_body_json(resp).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/register")
            .set_json(register_payload("bob@two.edu", "School Two"))
            .to_request(),
    )
    .await;
    let bob: serde_json::Value = test::read_body_json(resp).await;

    // Recover Bob's user id from his verified access token claims.
    let bob_access = bob["accessToken"].as_str().unwrap();
    let bob_user_id = state
        .token_service
        .verify_access_token(bob_access)
        .unwrap()
        .user_id()
        .unwrap();

    // Alice may not revoke Bob's tokens.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/revokeRefreshTokens")
            .insert_header((
                "Authorization",
                format!("Bearer {}", alice["accessToken"].as_str().unwrap()),
            ))
            .set_json(serde_json::json!({ "userId": bob_user_id }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Bob may revoke his own; afterwards his refresh token is dead.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/revokeRefreshTokens")
            .insert_header(("Authorization", format!("Bearer {}", bob_access)))
            .set_json(serde_json::json!({ "userId": bob_user_id }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/refreshToken")
            .set_json(serde_json::json!({
                "refreshToken": bob["refreshToken"].as_str().unwrap(),
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
