//! Repository interfaces for domain persistence.
//!
//! Each aggregate gets a trait describing its persistence contract plus an
//! in-memory mock used by service and API tests. Concrete MySQL
//! implementations live in the infrastructure crate.

pub mod attendance;
pub mod message;
pub mod school;
pub mod student;
pub mod teacher;
pub mod token;
pub mod user;

pub use attendance::{AttendanceRepository, MockAttendanceRepository};
pub use message::{MessageRepository, MockMessageRepository};
pub use school::{MockSchoolRepository, SchoolRepository};
pub use student::{MockStudentRepository, StudentRepository};
pub use teacher::{MockTeacherRepository, TeacherRepository};
pub use token::{MockTokenRepository, TokenRepository};
pub use user::{MockUserRepository, UserRepository};
