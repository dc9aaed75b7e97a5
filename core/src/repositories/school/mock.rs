//! In-memory implementation of SchoolRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::school::School;
use crate::errors::{AuthError, DomainError};

use super::r#trait::SchoolRepository;

/// Mock school repository backed by a HashMap keyed on school id
pub struct MockSchoolRepository {
    schools: Arc<RwLock<HashMap<Uuid, School>>>,
}

impl MockSchoolRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            schools: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockSchoolRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchoolRepository for MockSchoolRepository {
    async fn save(&self, school: School) -> Result<School, DomainError> {
        let mut schools = self.schools.write().await;

        if schools.values().any(|s| s.name == school.name) {
            return Err(DomainError::Auth(AuthError::SchoolNameAlreadyInUse));
        }

        schools.insert(school.id, school.clone());
        Ok(school)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, DomainError> {
        Ok(self.schools.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<School>, DomainError> {
        let schools = self.schools.read().await;
        Ok(schools.values().find(|s| s.name == name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        Ok(self.schools.read().await.values().cloned().collect())
    }

    async fn update(&self, school: School) -> Result<bool, DomainError> {
        let mut schools = self.schools.write().await;
        match schools.get_mut(&school.id) {
            Some(existing) => {
                *existing = school;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.schools.write().await.remove(&id).is_some())
    }
}
