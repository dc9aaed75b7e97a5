use actix_web::{web, HttpResponse};

use crate::dto::auth_dto::RevokeTokensRequest;
use crate::dto::MessageResponse;
use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthUser;

use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};

use super::super::AppState;

/// Handler for POST /api/revokeRefreshTokens
///
/// Revokes every outstanding refresh token of the target user. The caller
/// must be the target user or the super admin; already-issued access
/// tokens remain valid until they expire.
///
/// # Errors
/// - 401 Unauthorized: caller is neither the target nor the super admin
pub async fn revoke_refresh_tokens<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    request: web::Json<RevokeTokensRequest>,
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
    match state
        .auth_service
        .revoke_tokens(&auth.0, request.user_id)
        .await
    {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new(format!(
            "Tokens revoked for user {}",
            request.user_id
        ))),
        Err(error) => handle_domain_error(error),
    }
}
