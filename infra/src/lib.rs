//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SchoolMgmt
//! application. It provides the concrete MySQL implementations of the
//! repository traits declared in `sm_core`, plus connection pool
//! management.

pub mod database;

pub use database::connection::DatabasePool;
pub use database::mysql::{
    MySqlAttendanceRepository, MySqlMessageRepository, MySqlSchoolRepository,
    MySqlStudentRepository, MySqlTeacherRepository, MySqlTokenRepository, MySqlUserRepository,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
