//! Student profile routes, tenant-scoped to the caller's school.

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::staff_dto::{CreateProfileRequest, UpdateProfileRequest};
use crate::dto::MessageResponse;
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthUser;

use sm_core::domain::entities::student::Student;
use sm_core::domain::entities::user::{Role, User};
use sm_core::errors::DomainError;
use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};
use sm_core::services::policy::{table, ResourceScope};

use super::AppState;

/// Handler for GET /api/students
///
/// Lists the students of the caller's school.
pub async fn list_students<U, S, T, ST, TE, A, M>(
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
            .authorize(&table::STUDENT_LIST, &auth.0, &ResourceScope::none())
    {
        return handle_domain_error(error);
    }

    match state
        .student_repository
        .find_all_by_school(auth.school_id)
        .await
    {
        Ok(students) => HttpResponse::Ok().json(students),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/student/{id}
///
/// A student of another school is indistinguishable from a missing one.
pub async fn get_student<U, S, T, ST, TE, A, M>(
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
    let student = match state.student_repository.find_by_id(path.into_inner()).await {
        Ok(Some(student)) => student,
        Ok(None) => return handle_domain_error(DomainError::not_found("student")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::STUDENT_READ,
        &auth.0,
        &ResourceScope::school(student.school_id),
    ) {
        return handle_domain_error(error);
    }

    HttpResponse::Ok().json(student)
}

/// Handler for POST /api/student
///
/// Creates the login user (student role) and the profile in one step,
/// both in the caller's school.
pub async fn create_student<U, S, T, ST, TE, A, M>(
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
            .authorize(&table::STUDENT_CREATE, &auth.0, &ResourceScope::none())
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

    let user = User::new(request.email, password_hash, Role::Student, auth.school_id);
    let user = match state.user_repository.save(user).await {
        Ok(user) => user,
        Err(error) => return handle_domain_error(error),
    };

    let mut student = Student::new(
        user.id,
        auth.school_id,
        request.firstname,
        request.lastname,
        request.gender,
    );
    student.phone = request.phone;
    student.address = request.address;

    match state.student_repository.save(student).await {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/student/{id}
pub async fn update_student<U, S, T, ST, TE, A, M>(
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

    let mut student = match state.student_repository.find_by_id(path.into_inner()).await {
        Ok(Some(student)) => student,
        Ok(None) => return handle_domain_error(DomainError::not_found("student")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::STUDENT_WRITE,
        &auth.0,
        &ResourceScope::school(student.school_id),
    ) {
        return handle_domain_error(error);
    }

    let request = request.into_inner();
    if let Some(firstname) = request.firstname {
        student.firstname = firstname;
    }
    if let Some(lastname) = request.lastname {
        student.lastname = lastname;
    }
    if let Some(gender) = request.gender {
        student.gender = gender;
    }
    if request.phone.is_some() {
        student.phone = request.phone;
    }
    if request.address.is_some() {
        student.address = request.address;
    }

    match state.student_repository.update(student.clone()).await {
        Ok(true) => HttpResponse::Ok().json(student),
        Ok(false) => handle_domain_error(DomainError::not_found("student")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/student/{id}
///
/// Aggregate delete: removes the profile and its owning user in one
/// transaction, then revokes that user's refresh tokens.
pub async fn delete_student<U, S, T, ST, TE, A, M>(
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
    let student = match state.student_repository.find_by_id(path.into_inner()).await {
        Ok(Some(student)) => student,
        Ok(None) => return handle_domain_error(DomainError::not_found("student")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::STUDENT_WRITE,
        &auth.0,
        &ResourceScope::school(student.school_id),
    ) {
        return handle_domain_error(error);
    }

    if let Err(error) = state
        .student_repository
        .delete_with_user(student.id, student.user_id)
        .await
    {
        return handle_domain_error(error);
    }

    if let Err(error) = state.token_service.revoke_all_tokens(student.user_id).await {
        return handle_domain_error(error);
    }

    HttpResponse::Ok().json(MessageResponse::new("Student deleted"))
}
