use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, RegisterRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};
use sm_core::services::auth::RegisterSchoolData;

use super::super::AppState;

/// Handler for POST /api/register
///
/// Creates a school together with its admin user and returns a token
/// pair for the new admin.
///
/// # Errors
/// - 400 Bad Request: missing fields or school name/email already in use
pub async fn register<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    request: web::Json<RegisterRequest>,
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

    let request = request.into_inner();
    let data = RegisterSchoolData {
        email: request.email,
        password: request.password,
        name: request.name,
        address: request.address,
        phone: request.phone,
        website: request.website,
    };

    match state.auth_service.register(data).await {
        Ok(pair) => HttpResponse::Ok().json(AuthResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
