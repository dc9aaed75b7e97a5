//! School repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::school::School;
use crate::errors::DomainError;

/// Repository trait for School entity persistence operations
///
/// School names are unique across all tenants; `save` fails on a
/// duplicate name.
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// Persist a new school
    async fn save(&self, school: School) -> Result<School, DomainError>;

    /// Find a school by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, DomainError>;

    /// Find a school by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<School>, DomainError>;

    /// List all schools
    async fn find_all(&self) -> Result<Vec<School>, DomainError>;

    /// Replace the stored school with the given state
    ///
    /// # Returns
    /// * `Ok(true)` - School existed and was updated
    /// * `Ok(false)` - No school with that id
    async fn update(&self, school: School) -> Result<bool, DomainError>;

    /// Delete a school by id
    ///
    /// # Returns
    /// * `Ok(true)` - School existed and was deleted
    /// * `Ok(false)` - No school with that id
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
