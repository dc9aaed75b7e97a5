//! Attendance repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::attendance::Attendance;
use crate::errors::DomainError;

/// Repository trait for Attendance record persistence operations
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Persist a new attendance record
    async fn save(&self, record: Attendance) -> Result<Attendance, DomainError>;

    /// Find a record by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>, DomainError>;

    /// List all records for a student, newest first
    async fn find_all_by_student(&self, student_id: Uuid) -> Result<Vec<Attendance>, DomainError>;

    /// Replace the stored record with the given state
    async fn update(&self, record: Attendance) -> Result<bool, DomainError>;

    /// Delete a record by id
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
