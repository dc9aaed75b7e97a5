//! MySQL implementation of the TeacherRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sm_core::domain::entities::student::Gender;
use sm_core::domain::entities::teacher::Teacher;
use sm_core::errors::DomainError;
use sm_core::repositories::TeacherRepository;

use super::db_error;

/// MySQL implementation of TeacherRepository
///
/// Mirrors the student repository, including the transactional
/// aggregate delete of profile plus owning user.
pub struct MySqlTeacherRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTeacherRepository {
    /// Create a new MySQL teacher repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Teacher entity
    fn row_to_teacher(row: &sqlx::mysql::MySqlRow) -> Result<Teacher, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_error("Failed to get user_id", e))?;
        let school_id: String = row
            .try_get("school_id")
            .map_err(|e| db_error("Failed to get school_id", e))?;
        let gender: String = row
            .try_get("gender")
            .map_err(|e| db_error("Failed to get gender", e))?;

        Ok(Teacher {
            id: Uuid::parse_str(&id).map_err(|e| db_error("Invalid teacher UUID", e))?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| db_error("Invalid user UUID", e))?,
            school_id: Uuid::parse_str(&school_id)
                .map_err(|e| db_error("Invalid school UUID", e))?,
            firstname: row
                .try_get("firstname")
                .map_err(|e| db_error("Failed to get firstname", e))?,
            lastname: row
                .try_get("lastname")
                .map_err(|e| db_error("Failed to get lastname", e))?,
            gender: match gender.as_str() {
                "female" => Gender::Female,
                _ => Gender::Male,
            },
            phone: row
                .try_get("phone")
                .map_err(|e| db_error("Failed to get phone", e))?,
            address: row
                .try_get("address")
                .map_err(|e| db_error("Failed to get address", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_error("Failed to get updated_at", e))?,
        })
    }

    fn gender_str(gender: Gender) -> &'static str {
        match gender {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

const TEACHER_COLUMNS: &str =
    "id, user_id, school_id, firstname, lastname, gender, phone, address, created_at, updated_at";

#[async_trait]
impl TeacherRepository for MySqlTeacherRepository {
    async fn save(&self, teacher: Teacher) -> Result<Teacher, DomainError> {
        let query = r#"
            INSERT INTO teachers (
                id, user_id, school_id, firstname, lastname, gender, phone,
                address, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(teacher.id.to_string())
            .bind(teacher.user_id.to_string())
            .bind(teacher.school_id.to_string())
            .bind(&teacher.firstname)
            .bind(&teacher.lastname)
            .bind(Self::gender_str(teacher.gender))
            .bind(&teacher.phone)
            .bind(&teacher.address)
            .bind(teacher.created_at)
            .bind(teacher.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save teacher", e))?;

        Ok(teacher)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Teacher>, DomainError> {
        let query = format!("SELECT {} FROM teachers WHERE id = ? LIMIT 1", TEACHER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find teacher by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_teacher(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Teacher>, DomainError> {
        let query = format!(
            "SELECT {} FROM teachers WHERE user_id = ? LIMIT 1",
            TEACHER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find teacher by user id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_teacher(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Teacher>, DomainError> {
        let query = format!(
            "SELECT {} FROM teachers WHERE school_id = ? ORDER BY lastname, firstname",
            TEACHER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(school_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list teachers", e))?;

        rows.iter().map(Self::row_to_teacher).collect()
    }

    async fn update(&self, teacher: Teacher) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE teachers
            SET firstname = ?, lastname = ?, gender = ?, phone = ?, address = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&teacher.firstname)
            .bind(&teacher.lastname)
            .bind(Self::gender_str(teacher.gender))
            .bind(&teacher.phone)
            .bind(&teacher.address)
            .bind(Utc::now())
            .bind(teacher.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update teacher", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_with_user(&self, id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin delete transaction", e))?;

        let deleted = sqlx::query("DELETE FROM teachers WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete teacher", e))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::not_found("teacher"));
        }

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete owning user", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit delete", e))?;

        Ok(())
    }
}
