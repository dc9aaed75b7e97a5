//! School management routes, reserved for the super admin.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::school_dto::{CreateSchoolRequest, UpdateSchoolRequest};
use crate::dto::MessageResponse;
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthUser;

use sm_core::domain::entities::school::School;
use sm_core::errors::DomainError;
use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};
use sm_core::services::policy::{table, ResourceScope};

use super::AppState;

/// Handler for GET /api/schools
pub async fn list_schools<U, S, T, ST, TE, A, M>(
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
            .authorize(&table::SCHOOL_READ, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }

    match state.school_repository.find_all().await {
        Ok(schools) => HttpResponse::Ok().json(schools),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/school/{id}
pub async fn get_school<U, S, T, ST, TE, A, M>(
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
    if let Err(error) =
        state
            .policy_gate
            .authorize(&table::SCHOOL_READ, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }

    match state.school_repository.find_by_id(path.into_inner()).await {
        Ok(Some(school)) => HttpResponse::Ok().json(school),
        Ok(None) => handle_domain_error(DomainError::not_found("school")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/school
pub async fn create_school<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    request: web::Json<CreateSchoolRequest>,
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
            .authorize(&table::SCHOOL_WRITE, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let mut school = School::new(request.name, request.email).with_contact(
        request.address,
        request.phone,
        request.website,
    );
    school.logo = request.logo;
    school.description = request.description;

    match state.school_repository.save(school).await {
        Ok(school) => HttpResponse::Ok().json(school),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/school/{id}
pub async fn update_school<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateSchoolRequest>,
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
            .authorize(&table::SCHOOL_WRITE, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let mut school = match state.school_repository.find_by_id(path.into_inner()).await {
        Ok(Some(school)) => school,
        Ok(None) => return handle_domain_error(DomainError::not_found("school")),
        Err(error) => return handle_domain_error(error),
    };

    let request = request.into_inner();
    if let Some(name) = request.name {
        school.name = name;
    }
    if let Some(email) = request.email {
        school.email = email;
    }
    if request.address.is_some() {
        school.address = request.address;
    }
    if request.phone.is_some() {
        school.phone = request.phone;
    }
    if request.website.is_some() {
        school.website = request.website;
    }
    if request.logo.is_some() {
        school.logo = request.logo;
    }
    if request.description.is_some() {
        school.description = request.description;
    }

    match state.school_repository.update(school.clone()).await {
        Ok(true) => HttpResponse::Ok().json(school),
        Ok(false) => handle_domain_error(DomainError::not_found("school")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/school/{id}
pub async fn delete_school<U, S, T, ST, TE, A, M>(
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
    if let Err(error) =
        state
            .policy_gate
            .authorize(&table::SCHOOL_WRITE, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }

    match state.school_repository.delete(path.into_inner()).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("School deleted")),
        Ok(false) => handle_domain_error(DomainError::not_found("school")),
        Err(error) => handle_domain_error(error),
    }
}
