//! In-memory implementation of TeacherRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::teacher::Teacher;
use crate::errors::DomainError;

use super::r#trait::TeacherRepository;

/// Mock teacher repository backed by a HashMap keyed on profile id
pub struct MockTeacherRepository {
    teachers: Arc<RwLock<HashMap<Uuid, Teacher>>>,
}

impl MockTeacherRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            teachers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockTeacherRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TeacherRepository for MockTeacherRepository {
    async fn save(&self, teacher: Teacher) -> Result<Teacher, DomainError> {
        let mut teachers = self.teachers.write().await;
        teachers.insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, DomainError> {
        Ok(self.teachers.read().await.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Teacher>, DomainError> {
        let teachers = self.teachers.read().await;
        Ok(teachers.values().find(|t| t.user_id == user_id).cloned())
    }

    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Teacher>, DomainError> {
        let teachers = self.teachers.read().await;
        Ok(teachers
            .values()
            .filter(|t| t.school_id == school_id)
            .cloned()
            .collect())
    }

    async fn update(&self, teacher: Teacher) -> Result<bool, DomainError> {
        let mut teachers = self.teachers.write().await;
        match teachers.get_mut(&teacher.id) {
            Some(existing) => {
                *existing = teacher;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_with_user(&self, id: Uuid, _user_id: Uuid) -> Result<(), DomainError> {
        let mut teachers = self.teachers.write().await;
        teachers
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("teacher"))
    }
}
