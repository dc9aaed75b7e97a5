//! Route handlers grouped by resource.

pub mod attendance;
pub mod auth;
pub mod messages;
pub mod schools;
pub mod students;
pub mod teachers;

use std::sync::Arc;

use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};
use sm_core::services::auth::AuthService;
use sm_core::services::password::PasswordHasher;
use sm_core::services::policy::PolicyGate;
use sm_core::services::token::TokenService;

/// Shared application state injected into every handler
///
/// Generic over the repository implementations so the same handlers run
/// against MySQL in production and the in-memory mocks in tests.
pub struct AppState<U, S, T, ST, TE, A, M>
where
    U: UserRepository,
    S: SchoolRepository,
    T: TokenRepository,
    ST: StudentRepository,
    TE: TeacherRepository,
    A: AttendanceRepository,
    M: MessageRepository,
{
    pub auth_service: Arc<AuthService<U, S, T>>,
    pub token_service: Arc<TokenService<T>>,
    pub policy_gate: Arc<PolicyGate>,
    pub password_hasher: PasswordHasher,
    pub user_repository: Arc<U>,
    pub school_repository: Arc<S>,
    pub student_repository: Arc<ST>,
    pub teacher_repository: Arc<TE>,
    pub attendance_repository: Arc<A>,
    pub message_repository: Arc<M>,
}
