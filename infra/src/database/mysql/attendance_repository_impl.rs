//! MySQL implementation of the AttendanceRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sm_core::domain::entities::attendance::{Attendance, AttendanceKind};
use sm_core::errors::DomainError;
use sm_core::repositories::AttendanceRepository;

use super::db_error;

/// MySQL implementation of AttendanceRepository
pub struct MySqlAttendanceRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAttendanceRepository {
    /// Create a new MySQL attendance repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Attendance entity
    fn row_to_attendance(row: &sqlx::mysql::MySqlRow) -> Result<Attendance, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;
        let teacher_id: String = row
            .try_get("teacher_id")
            .map_err(|e| db_error("Failed to get teacher_id", e))?;
        let student_id: String = row
            .try_get("student_id")
            .map_err(|e| db_error("Failed to get student_id", e))?;
        let school_id: String = row
            .try_get("school_id")
            .map_err(|e| db_error("Failed to get school_id", e))?;
        let kind: String = row
            .try_get("kind")
            .map_err(|e| db_error("Failed to get kind", e))?;

        Ok(Attendance {
            id: Uuid::parse_str(&id).map_err(|e| db_error("Invalid attendance UUID", e))?,
            teacher_id: Uuid::parse_str(&teacher_id)
                .map_err(|e| db_error("Invalid teacher UUID", e))?,
            student_id: Uuid::parse_str(&student_id)
                .map_err(|e| db_error("Invalid student UUID", e))?,
            school_id: Uuid::parse_str(&school_id)
                .map_err(|e| db_error("Invalid school UUID", e))?,
            subject: row
                .try_get("subject")
                .map_err(|e| db_error("Failed to get subject", e))?,
            date: row
                .try_get::<DateTime<Utc>, _>("date")
                .map_err(|e| db_error("Failed to get date", e))?,
            kind: Self::kind_from_str(&kind),
            description: row
                .try_get("description")
                .map_err(|e| db_error("Failed to get description", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_error("Failed to get updated_at", e))?,
        })
    }

    fn kind_from_str(kind: &str) -> AttendanceKind {
        match kind {
            "absent" => AttendanceKind::Absent,
            "leave" => AttendanceKind::Leave,
            _ => AttendanceKind::Present,
        }
    }

    fn kind_str(kind: AttendanceKind) -> &'static str {
        match kind {
            AttendanceKind::Present => "present",
            AttendanceKind::Absent => "absent",
            AttendanceKind::Leave => "leave",
        }
    }
}

const ATTENDANCE_COLUMNS: &str = "id, teacher_id, student_id, school_id, subject, date, kind, \
                                  description, created_at, updated_at";

#[async_trait]
impl AttendanceRepository for MySqlAttendanceRepository {
    async fn save(&self, record: Attendance) -> Result<Attendance, DomainError> {
        let query = r#"
            INSERT INTO attendances (
                id, teacher_id, student_id, school_id, subject, date, kind,
                description, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.teacher_id.to_string())
            .bind(record.student_id.to_string())
            .bind(record.school_id.to_string())
            .bind(&record.subject)
            .bind(record.date)
            .bind(Self::kind_str(record.kind))
            .bind(&record.description)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save attendance", e))?;

        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendance>, DomainError> {
        let query = format!(
            "SELECT {} FROM attendances WHERE id = ? LIMIT 1",
            ATTENDANCE_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find attendance by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_attendance(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<Attendance>, DomainError> {
        let query = format!(
            "SELECT {} FROM attendances WHERE student_id = ? ORDER BY date DESC",
            ATTENDANCE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(student_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list attendances", e))?;

        rows.iter().map(Self::row_to_attendance).collect()
    }

    async fn update(&self, record: Attendance) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE attendances
            SET kind = ?, description = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(Self::kind_str(record.kind))
            .bind(&record.description)
            .bind(Utc::now())
            .bind(record.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update attendance", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete attendance", e))?;

        Ok(result.rows_affected() > 0)
    }
}
