//! Teacher repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::teacher::Teacher;
use crate::errors::DomainError;

/// Repository trait for Teacher profile persistence operations
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// Persist a new teacher profile
    async fn save(&self, teacher: Teacher) -> Result<Teacher, DomainError>;

    /// Find a teacher profile by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, DomainError>;

    /// Find the teacher profile backed by the given user
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Teacher>, DomainError>;

    /// List all teachers of a school
    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Teacher>, DomainError>;

    /// Replace the stored profile with the given state
    async fn update(&self, teacher: Teacher) -> Result<bool, DomainError>;

    /// Delete the profile together with its owning user row (see
    /// `StudentRepository::delete_with_user` for the contract)
    async fn delete_with_user(&self, id: Uuid, user_id: Uuid) -> Result<(), DomainError>;
}
