use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};

use super::super::AppState;

/// Handler for POST /api/login
///
/// # Errors
/// - 400 Bad Request: missing fields
/// - 403 Forbidden: invalid credentials
pub async fn login<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SchoolRepository + 'static,
    T: TokenRepository + 'static,
    ST: StudentRepository + 'static,
    TE: TeacherRepository + 'static,
    A: AttendanceRepository + 'static,
    M: MessageRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
