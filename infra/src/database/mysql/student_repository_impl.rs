//! MySQL implementation of the StudentRepository trait.
//!
//! The aggregate delete removes the profile row and the owning user row
//! in one transaction, making the cascade contract explicit instead of
//! relying on foreign-key side effects.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sm_core::domain::entities::student::{Gender, Student};
use sm_core::errors::DomainError;
use sm_core::repositories::StudentRepository;

use super::db_error;

/// MySQL implementation of StudentRepository
pub struct MySqlStudentRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlStudentRepository {
    /// Create a new MySQL student repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Student entity
    fn row_to_student(row: &sqlx::mysql::MySqlRow) -> Result<Student, DomainError> {
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

        Ok(Student {
            id: Uuid::parse_str(&id).map_err(|e| db_error("Invalid student UUID", e))?,
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

const STUDENT_COLUMNS: &str =
    "id, user_id, school_id, firstname, lastname, gender, phone, address, created_at, updated_at";

#[async_trait]
impl StudentRepository for MySqlStudentRepository {
    async fn save(&self, student: Student) -> Result<Student, DomainError> {
        let query = r#"
            INSERT INTO students (
                id, user_id, school_id, firstname, lastname, gender, phone,
                address, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(student.id.to_string())
            .bind(student.user_id.to_string())
            .bind(student.school_id.to_string())
            .bind(&student.firstname)
            .bind(&student.lastname)
            .bind(Self::gender_str(student.gender))
            .bind(&student.phone)
            .bind(&student.address)
            .bind(student.created_at)
            .bind(student.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save student", e))?;

        Ok(student)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Student>, DomainError> {
        let query = format!("SELECT {} FROM students WHERE id = ? LIMIT 1", STUDENT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find student by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_student(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Student>, DomainError> {
        let query = format!(
            "SELECT {} FROM students WHERE user_id = ? LIMIT 1",
            STUDENT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find student by user id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_student(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Student>, DomainError> {
        let query = format!(
            "SELECT {} FROM students WHERE school_id = ? ORDER BY lastname, firstname",
            STUDENT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(school_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list students", e))?;

        rows.iter().map(Self::row_to_student).collect()
    }

    async fn update(&self, student: Student) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE students
            SET firstname = ?, lastname = ?, gender = ?, phone = ?, address = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&student.firstname)
            .bind(&student.lastname)
            .bind(Self::gender_str(student.gender))
            .bind(&student.phone)
            .bind(&student.address)
            .bind(Utc::now())
            .bind(student.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update student", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_with_user(&self, id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin delete transaction", e))?;

        let deleted = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete student", e))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::not_found("student"));
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
