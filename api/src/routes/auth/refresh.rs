use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, RefreshTokenRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};

use super::super::AppState;

/// Handler for POST /api/refreshToken
///
/// Exchanges a valid refresh token for a fresh pair. The presented token
/// is consumed; replaying it afterwards fails.
///
/// # Errors
/// - 400 Bad Request: missing token
/// - 401 Unauthorized: invalid, expired, rotated, or revoked token
pub async fn refresh_token<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    request: web::Json<RefreshTokenRequest>,
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

    match state.auth_service.refresh_token(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
