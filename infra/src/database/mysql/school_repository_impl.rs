//! MySQL implementation of the SchoolRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sm_core::domain::entities::school::School;
use sm_core::errors::{AuthError, DomainError};
use sm_core::repositories::SchoolRepository;

use super::db_error;

/// MySQL implementation of SchoolRepository
///
/// Name uniqueness is backed by a unique index on `schools.name`.
pub struct MySqlSchoolRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSchoolRepository {
    /// Create a new MySQL school repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to School entity
    fn row_to_school(row: &sqlx::mysql::MySqlRow) -> Result<School, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;

        Ok(School {
            id: Uuid::parse_str(&id).map_err(|e| db_error("Invalid school UUID", e))?,
            name: row
                .try_get("name")
                .map_err(|e| db_error("Failed to get name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| db_error("Failed to get email", e))?,
            address: row
                .try_get("address")
                .map_err(|e| db_error("Failed to get address", e))?,
            phone: row
                .try_get("phone")
                .map_err(|e| db_error("Failed to get phone", e))?,
            website: row
                .try_get("website")
                .map_err(|e| db_error("Failed to get website", e))?,
            logo: row
                .try_get("logo")
                .map_err(|e| db_error("Failed to get logo", e))?,
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
}

const SCHOOL_COLUMNS: &str =
    "id, name, email, address, phone, website, logo, description, created_at, updated_at";

#[async_trait]
impl SchoolRepository for MySqlSchoolRepository {
    async fn save(&self, school: School) -> Result<School, DomainError> {
        let query = r#"
            INSERT INTO schools (
                id, name, email, address, phone, website, logo, description,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(school.id.to_string())
            .bind(&school.name)
            .bind(&school.email)
            .bind(&school.address)
            .bind(&school.phone)
            .bind(&school.website)
            .bind(&school.logo)
            .bind(&school.description)
            .bind(school.created_at)
            .bind(school.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e.as_database_error() {
                Some(db) if db.is_unique_violation() => {
                    DomainError::Auth(AuthError::SchoolNameAlreadyInUse)
                }
                _ => db_error("Failed to save school", e),
            })?;

        Ok(school)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, DomainError> {
        let query = format!(
            "SELECT {} FROM schools WHERE id = ? LIMIT 1",
            SCHOOL_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find school by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_school(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<School>, DomainError> {
        let query = format!(
            "SELECT {} FROM schools WHERE name = ? LIMIT 1",
            SCHOOL_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find school by name", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_school(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<School>, DomainError> {
        let query = format!("SELECT {} FROM schools ORDER BY created_at", SCHOOL_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list schools", e))?;

        rows.iter().map(Self::row_to_school).collect()
    }

    async fn update(&self, school: School) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE schools
            SET name = ?, email = ?, address = ?, phone = ?, website = ?,
                logo = ?, description = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&school.name)
            .bind(&school.email)
            .bind(&school.address)
            .bind(&school.phone)
            .bind(&school.website)
            .bind(&school.logo)
            .bind(&school.description)
            .bind(Utc::now())
            .bind(school.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update school", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete school", e))?;

        Ok(result.rows_affected() > 0)
    }
}
