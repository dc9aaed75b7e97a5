//! In-memory implementation of AttendanceRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::attendance::Attendance;
use crate::errors::DomainError;

use super::r#trait::AttendanceRepository;

/// Mock attendance repository backed by a HashMap keyed on record id
pub struct MockAttendanceRepository {
    records: Arc<RwLock<HashMap<Uuid, Attendance>>>,
}

impl MockAttendanceRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockAttendanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttendanceRepository for MockAttendanceRepository {
    async fn save(&self, record: Attendance) -> Result<Attendance, DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>, DomainError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_all_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<Attendance>, DomainError> {
        let records = self.records.read().await;
        let mut result: Vec<Attendance> = records
            .values()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(result)
    }

    async fn update(&self, record: Attendance) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
