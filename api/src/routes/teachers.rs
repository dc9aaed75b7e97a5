//! Teacher profile routes; same rules and shape as student profiles.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::staff_dto::{CreateProfileRequest, UpdateProfileRequest};
use crate::dto::MessageResponse;
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthUser;

use sm_core::domain::entities::teacher::Teacher;
use sm_core::domain::entities::user::{Role, User};
use sm_core::errors::DomainError;
use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};
use sm_core::services::policy::{table, ResourceScope};

use super::AppState;

/// Handler for GET /api/teachers
pub async fn list_teachers<U, S, T, ST, TE, A, M>(
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
            .authorize(&table::TEACHER_LIST, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }

    match state
        .teacher_repository
        .find_all_by_school(auth.school_id)
        .await
    {
        Ok(teachers) => HttpResponse::Ok().json(teachers),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/teacher/{id}
pub async fn get_teacher<U, S, T, ST, TE, A, M>(
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
    let teacher = match state.teacher_repository.find_by_id(path.into_inner()).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return handle_domain_error(DomainError::not_found("teacher")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::TEACHER_READ,
        &auth.0,
        &ResourceScope::school(teacher.school_id),
    ) {
        return handle_domain_error(error);
    }

    HttpResponse::Ok().json(teacher)
}

/// Handler for POST /api/teacher
pub async fn create_teacher<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    request: web::Json<CreateProfileRequest>,
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
            .authorize(&table::TEACHER_CREATE, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let password_hash = match state.password_hasher.hash(&request.password) {
        Ok(hash) => hash,
        Err(error) => return handle_domain_error(error),
    };

    let user = User::new(request.email, password_hash, Role::Teacher, auth.school_id);
    let user = match state.user_repository.save(user).await {
        Ok(user) => user,
        Err(error) => return handle_domain_error(error),
    };

    let mut teacher = Teacher::new(
        user.id,
        auth.school_id,
        request.firstname,
        request.lastname,
        request.gender,
    );
    teacher.phone = request.phone;
    teacher.address = request.address;

    match state.teacher_repository.save(teacher).await {
        Ok(teacher) => HttpResponse::Ok().json(teacher),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/teacher/{id}
pub async fn update_teacher<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateProfileRequest>,
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

    let mut teacher = match state.teacher_repository.find_by_id(path.into_inner()).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return handle_domain_error(DomainError::not_found("teacher")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::TEACHER_WRITE,
        &auth.0,
        &ResourceScope::school(teacher.school_id),
    ) {
        return handle_domain_error(error);
    }

    let request = request.into_inner();
    if let Some(firstname) = request.firstname {
        teacher.firstname = firstname;
    }
    if let Some(lastname) = request.lastname {
        teacher.lastname = lastname;
    }
    if let Some(gender) = request.gender {
        teacher.gender = gender;
    }
    if request.phone.is_some() {
        teacher.phone = request.phone;
    }
    if request.address.is_some() {
        teacher.address = request.address;
    }

    match state.teacher_repository.update(teacher.clone()).await {
        Ok(true) => HttpResponse::Ok().json(teacher),
        Ok(false) => handle_domain_error(DomainError::not_found("teacher")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/teacher/{id}
///
/// Same aggregate-delete contract as students.
pub async fn delete_teacher<U, S, T, ST, TE, A, M>(
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
    let teacher = match state.teacher_repository.find_by_id(path.into_inner()).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return handle_domain_error(DomainError::not_found("teacher")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::TEACHER_WRITE,
        &auth.0,
        &ResourceScope::school(teacher.school_id),
    ) {
        return handle_domain_error(error);
    }

    if let Err(error) = state
        .teacher_repository
        .delete_with_user(teacher.id, teacher.user_id)
        .await
    {
        return handle_domain_error(error);
    }

    if let Err(error) = state.token_service.revoke_all_tokens(teacher.user_id).await {
        return handle_domain_error(error);
    }

    HttpResponse::Ok().json(MessageResponse::new("Teacher deleted"))
}
