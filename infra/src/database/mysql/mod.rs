//! MySQL implementations of the core repository traits.

mod attendance_repository_impl;
mod message_repository_impl;
mod school_repository_impl;
mod student_repository_impl;
mod teacher_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use attendance_repository_impl::MySqlAttendanceRepository;
pub use message_repository_impl::MySqlMessageRepository;
pub use school_repository_impl::MySqlSchoolRepository;
pub use student_repository_impl::MySqlStudentRepository;
pub use teacher_repository_impl::MySqlTeacherRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use sm_core::errors::DomainError;

/// Maps a low-level database failure into an internal domain error
pub(crate) fn db_error(context: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}
