//! Attendance routes.
//!
//! Students read their own per-subject summary; teachers author records;
//! amendments are restricted to the authoring teacher or a same-school
//! admin through the policy table.

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::dto::attendance_dto::{
    AttendanceSummary, CreateAttendanceRequest, UpdateAttendanceRequest,
};
use crate::dto::MessageResponse;
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthUser;

use sm_core::domain::entities::attendance::{Attendance, AttendanceKind};
use sm_core::errors::DomainError;
use sm_core::repositories::{
    AttendanceRepository, MessageRepository, SchoolRepository, StudentRepository,
    TeacherRepository, TokenRepository, UserRepository,
};
use sm_core::services::policy::{table, ResourceScope};

use super::AppState;

/// Handler for GET /api/attendances
///
/// Returns the calling student's attendance aggregated per subject.
pub async fn list_own_attendance<U, S, T, ST, TE, A, M>(
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
    if let Err(error) = state.policy_gate.authorize(
        &table::ATTENDANCE_LIST_OWN,
        &auth.0,
        &ResourceScope::none(),
    ) {
        return handle_domain_error(error);
    }

    let student = match state
        .student_repository
        .find_by_user_id(auth.user_id)
        .await
    {
        Ok(Some(student)) => student,
        Ok(None) => return handle_domain_error(DomainError::not_found("student")),
        Err(error) => return handle_domain_error(error),
    };

    let records = match state
        .attendance_repository
        .find_all_by_student(student.id)
        .await
    {
        Ok(records) => records,
        Err(error) => return handle_domain_error(error),
    };

    HttpResponse::Ok().json(summarize(&records))
}

/// Handler for GET /api/attendance/{id}
pub async fn get_attendance<U, S, T, ST, TE, A, M>(
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
    let record = match state
        .attendance_repository
        .find_by_id(path.into_inner())
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => return handle_domain_error(DomainError::not_found("attendance")),
        Err(error) => return handle_domain_error(error),
    };

    if let Err(error) = state.policy_gate.authorize(
        &table::ATTENDANCE_READ,
        &auth.0,
        &ResourceScope::school(record.school_id),
    ) {
        return handle_domain_error(error);
    }

    HttpResponse::Ok().json(record)
}

/// Handler for POST /api/attendance
///
/// Only callers with a teacher profile may author records; the record
/// lands in the caller's school.
pub async fn create_attendance<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    request: web::Json<CreateAttendanceRequest>,
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
    if let Err(error) = state.policy_gate.authorize(
        &table::ATTENDANCE_CREATE,
        &auth.0,
        &ResourceScope::none(),
    ) {
        return handle_domain_error(error);
    }
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let teacher = match state
        .teacher_repository
        .find_by_user_id(auth.user_id)
        .await
    {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return handle_domain_error(DomainError::Unauthorized),
        Err(error) => return handle_domain_error(error),
    };

    let request = request.into_inner();
    let mut record = Attendance::new(
        teacher.id,
        request.student_id,
        auth.school_id,
        request.subject,
        request.date,
        request.kind,
    );
    record.description = request.description;

    match state.attendance_repository.save(record).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for PUT /api/attendance/{id}
pub async fn update_attendance<U, S, T, ST, TE, A, M>(
    state: web::Data<AppState<U, S, T, ST, TE, A, M>>,
    auth: AuthUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateAttendanceRequest>,
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
    let mut record = match state
        .attendance_repository
        .find_by_id(path.into_inner())
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => return handle_domain_error(DomainError::not_found("attendance")),
        Err(error) => return handle_domain_error(error),
    };

    let scope = match author_scope(&state, &record).await {
        Ok(scope) => scope,
        Err(error) => return handle_domain_error(error),
    };
    if let Err(error) = state
        .policy_gate
        .authorize(&table::ATTENDANCE_WRITE, &auth.0, &scope)
    {
        return handle_domain_error(error);
    }

    let request = request.into_inner();
    record.amend(request.kind, request.description);

    match state.attendance_repository.update(record.clone()).await {
        Ok(true) => HttpResponse::Ok().json(record),
        Ok(false) => handle_domain_error(DomainError::not_found("attendance")),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/attendance/{id}
pub async fn delete_attendance<U, S, T, ST, TE, A, M>(
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
    let record = match state
        .attendance_repository
        .find_by_id(path.into_inner())
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => return handle_domain_error(DomainError::not_found("attendance")),
        Err(error) => return handle_domain_error(error),
    };

    let scope = match author_scope(&state, &record).await {
        Ok(scope) => scope,
        Err(error) => return handle_domain_error(error),
    };
    if let Err(error) = state
        .policy_gate
        .authorize(&table::ATTENDANCE_WRITE, &auth.0, &scope)
    {
        return handle_domain_error(error);
    }

    match state.attendance_repository.delete(record.id).await {
        Ok(true) => HttpResponse::Ok().json(MessageResponse::new("Attendance deleted")),
        Ok(false) => handle_domain_error(DomainError::not_found("attendance")),
        Err(error) => handle_domain_error(error),
    }
}

/// Resolves the record's authoring teacher to a user-level resource scope
///
/// A dangling author leaves the owner empty, so the ownership check fails
/// closed for everyone but admins.
async fn author_scope<U, S, T, ST, TE, A, M>(
    state: &web::Data<AppState<U, S, T, ST, TE, A, M>>,
    record: &Attendance,
) -> Result<ResourceScope, DomainError>
where
    U: UserRepository + 'static,
    S: SchoolRepository + 'static,
    T: TokenRepository + 'static,
    ST: StudentRepository + 'static,
    TE: TeacherRepository + 'static,
    A: AttendanceRepository + 'static,
    M: MessageRepository + 'static,
{
    let author = state.teacher_repository.find_by_id(record.teacher_id).await?;
    Ok(ResourceScope {
        school_id: Some(record.school_id),
        owner_id: author.map(|teacher| teacher.user_id),
    })
}

/// Folds raw records into per-subject totals
fn summarize(records: &[Attendance]) -> Vec<AttendanceSummary> {
    let mut by_subject: BTreeMap<&str, AttendanceSummary> = BTreeMap::new();

    for record in records {
        let entry = by_subject
            .entry(record.subject.as_str())
            .or_insert_with(|| AttendanceSummary {
                subject: record.subject.clone(),
                total: 0,
                present: 0,
                absent: 0,
                leave: 0,
            });
        entry.total += 1;
        match record.kind {
            AttendanceKind::Present => entry.present += 1,
            AttendanceKind::Absent => entry.absent += 1,
            AttendanceKind::Leave => entry.leave += 1,
        }
    }

    by_subject.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(subject: &str, kind: AttendanceKind) -> Attendance {
        Attendance::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            subject.to_string(),
            Utc::now(),
            kind,
        )
    }

    #[test]
    fn test_summarize_groups_by_subject() {
        let records = vec![
            record("Maths", AttendanceKind::Present),
            record("Maths", AttendanceKind::Absent),
            record("Maths", AttendanceKind::Leave),
            record("Physics", AttendanceKind::Present),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.len(), 2);

        let maths = summary.iter().find(|s| s.subject == "Maths").unwrap();
        assert_eq!(maths.total, 3);
        assert_eq!(maths.present, 1);
        assert_eq!(maths.absent, 1);
        assert_eq!(maths.leave, 1);

        let physics = summary.iter().find(|s| s.subject == "Physics").unwrap();
        assert_eq!(physics.total, 1);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_empty());
    }
}
