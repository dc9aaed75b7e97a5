//! In-memory implementation of StudentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::student::Student;
use crate::errors::DomainError;

use super::r#trait::StudentRepository;

/// Mock student repository backed by a HashMap keyed on profile id
///
/// The aggregate delete only removes the profile here; tests that care
/// about the user row pair this with `MockUserRepository::remove`.
pub struct MockStudentRepository {
    students: Arc<RwLock<HashMap<Uuid, Student>>>,
}

impl MockStudentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            students: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockStudentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentRepository for MockStudentRepository {
    async fn save(&self, student: Student) -> Result<Student, DomainError> {
        let mut students = self.students.write().await;
        students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, DomainError> {
        Ok(self.students.read().await.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>, DomainError> {
        let students = self.students.read().await;
        Ok(students.values().find(|s| s.user_id == user_id).cloned())
    }

    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Student>, DomainError> {
        let students = self.students.read().await;
        Ok(students
            .values()
            .filter(|s| s.school_id == school_id)
            .cloned()
            .collect())
    }

    async fn update(&self, student: Student) -> Result<bool, DomainError> {
        let mut students = self.students.write().await;
        match students.get_mut(&student.id) {
            Some(existing) => {
                *existing = student;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_with_user(&self, id: Uuid, _user_id: Uuid) -> Result<(), DomainError> {
        let mut students = self.students.write().await;
        students
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("student"))
    }
}
