//! Student repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::student::Student;
use crate::errors::DomainError;

/// Repository trait for Student profile persistence operations
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Persist a new student profile
    async fn save(&self, student: Student) -> Result<Student, DomainError>;

    /// Find a student profile by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, DomainError>;

    /// Find the student profile backed by the given user
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>, DomainError>;

    /// List all students enrolled in a school
    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Student>, DomainError>;

    /// Replace the stored profile with the given state
    async fn update(&self, student: Student) -> Result<bool, DomainError>;

    /// Delete the profile together with its owning user row
    ///
    /// The aggregate-delete contract: both rows are removed in a single
    /// transaction, or neither is. Revoking the user's refresh tokens is
    /// the caller's responsibility.
    async fn delete_with_user(&self, id: Uuid, user_id: Uuid) -> Result<(), DomainError>;
}
