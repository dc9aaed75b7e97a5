//! Shared test harness: the full application wired onto in-memory
//! repositories.

use std::sync::Arc;

use actix_web::web;

use sm_api::routes::AppState;
use sm_core::repositories::{
    MockAttendanceRepository, MockMessageRepository, MockSchoolRepository, MockStudentRepository,
    MockTeacherRepository, MockTokenRepository, MockUserRepository,
};
use sm_core::services::auth::AuthService;
use sm_core::services::password::PasswordHasher;
use sm_core::services::policy::PolicyGate;
use sm_core::services::token::{TokenService, TokenServiceConfig};

pub const SUPER_ADMIN_EMAIL: &str = "root@school-mgmt.local";

pub type TestState = AppState<
    MockUserRepository,
    MockSchoolRepository,
    MockTokenRepository,
    MockStudentRepository,
    MockTeacherRepository,
    MockAttendanceRepository,
    MockMessageRepository,
>;

/// Builds the application state against fresh in-memory repositories
pub fn test_state() -> web::Data<TestState> {
    let user_repository = Arc::new(MockUserRepository::new());
    let school_repository = Arc::new(MockSchoolRepository::new());
    let student_repository = Arc::new(MockStudentRepository::new());
    let teacher_repository = Arc::new(MockTeacherRepository::new());
    let attendance_repository = Arc::new(MockAttendanceRepository::new());
    let message_repository = Arc::new(MockMessageRepository::new());

    let token_service = Arc::new(TokenService::new(
        MockTokenRepository::new(),
        TokenServiceConfig {
            access_secret: "integration-access-secret".to_string(),
            refresh_secret: "integration-refresh-secret".to_string(),
            access_token_expiry_seconds: 900,
            refresh_token_expiry_seconds: 3600,
        },
    ));
    let password_hasher = PasswordHasher::new(4);
    let policy_gate = Arc::new(PolicyGate::new(SUPER_ADMIN_EMAIL));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&school_repository),
        Arc::clone(&token_service),
        password_hasher.clone(),
        Arc::clone(&policy_gate),
    ));

    web::Data::new(AppState {
        auth_service,
        token_service,
        policy_gate,
        password_hasher,
        user_repository,
        school_repository,
        student_repository,
        teacher_repository,
        attendance_repository,
        message_repository,
    })
}

/// Registration payload with sane defaults
pub fn register_payload(email: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": "correct-horse-battery",
        "name": name,
    })
}
