//! Message routes; author-only edits, school-scoped reads.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::message_dto::{CreateMessageRequest, UpdateMessageRequest};
use crate::dto::MessageResponse;
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthUser;

use sm_core::domain::entities::message::Message;
use sm_core::errors::DomainError;
use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};
use sm_core::services::policy::{table, ResourceScope};

use super::AppState;

/// Handler for GET /api/messages
pub async fn list_messages<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
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
    if let Err(error) =
        state
            .policy_gate
            .authorize(&table::MESSAGE_LIST, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }

    match state
        .message_repository
        .find_all_by_school(auth.school_id)
        .await
    {
        Ok(messages) => HttpResponse::Ok().json(messages),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/message/{id}
pub async fn get_message<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    path: web::Path<Uuid>,
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
    let message = match state.message_repository.find_by_id(path.into_inner()).await {
        Ok(Some(message)) => message,
        Ok(None) => return handle_domain_error(DomainError::not_found("message")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::MESSAGE_READ,
        &auth.0,
        &ResourceScope::school(message.school_id),
    ) {
        return handle_domain_error(error);
    }

    HttpResponse::Ok().json(message)
}

/// Handler for POST /api/message
pub async fn create_message<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    request: web::Json<CreateMessageRequest>,
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
    if let Err(error) =
        state
            .policy_gate
            .authorize(&table::MESSAGE_CREATE, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let message = Message::new(auth.user_id, auth.school_id, request.title, request.body);

    match state.message_repository.save(message).await {
        Ok(message) => HttpResponse::Ok().json(message),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/message/{id}
pub async fn update_message<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateMessageRequest>,
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

    let mut message = match state.message_repository.find_by_id(path.into_inner()).await {
        Ok(Some(message)) => message,
        Ok(None) => return handle_domain_error(DomainError::not_found("message")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::MESSAGE_WRITE,
        &auth.0,
        &ResourceScope::owned(message.school_id, message.sender_id),
    ) {
        return handle_domain_error(error);
    }

    let request = request.into_inner();
    message.edit(request.title, request.body);

    match state.message_repository.update(message.clone()).await {
        Ok(true) => HttpResponse::Ok().json(message),
        Ok(false) => handle_domain_error(DomainError::not_found("message")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/message/{id}
pub async fn delete_message<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    path: web::Path<Uuid>,
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
    let message = match state.message_repository.find_by_id(path.into_inner()).await {
        Ok(Some(message)) => message,
        Ok(None) => return handle_domain_error(DomainError::not_found("message")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::MESSAGE_WRITE,
        &auth.0,
        &ResourceScope::owned(message.school_id, message.sender_id),
    ) {
        return handle_domain_error(error);
    }

    match state.message_repository.delete(message.id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Message deleted")),
        Ok(false) => handle_domain_error(DomainError::not_found("message")),
        Err(error) => handle_domain_error(error),
    }
}
