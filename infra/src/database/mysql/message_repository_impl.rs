//! MySQL implementation of the MessageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sm_core::domain::entities::message::Message;
use sm_core::errors::DomainError;
use sm_core::repositories::MessageRepository;

use super::db_error;

/// MySQL implementation of MessageRepository
pub struct MySqlMessageRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlMessageRepository {
    /// Create a new MySQL message repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Message entity
    fn row_to_message(row: &sqlx::mysql::MySqlRow) -> Result<Message, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| db_error("Failed to get id", e))?;
        let sender_id: String = row
            .try_get("sender_id")
            .map_err(|e| db_error("Failed to get sender_id", e))?;
        let school_id: String = row
            .try_get("school_id")
            .map_err(|e| db_error("Failed to get school_id", e))?;

        Ok(Message {
            id: Uuid::parse_str(&id).map_err(|e| db_error("Invalid message UUID", e))?,
            sender_id: Uuid::parse_str(&sender_id)
                .map_err(|e| db_error("Invalid sender UUID", e))?,
            school_id: Uuid::parse_str(&school_id)
                .map_err(|e| db_error("Invalid school UUID", e))?,
            title: row
                .try_get("title")
                .map_err(|e| db_error("Failed to get title", e))?,
            body: row
                .try_get("body")
                .map_err(|e| db_error("Failed to get body", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_error("Failed to get updated_at", e))?,
        })
    }
}

const MESSAGE_COLUMNS: &str = "id, sender_id, school_id, title, body, created_at, updated_at";

#[async_trait]
impl MessageRepository for MySqlMessageRepository {
    async fn save(&self, message: Message) -> Result<Message, DomainError> {
        let query = r#"
            INSERT INTO messages (
                id, sender_id, school_id, title, body, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(message.id.to_string())
            .bind(message.sender_id.to_string())
            .bind(message.school_id.to_string())
            .bind(&message.title)
            .bind(&message.body)
            .bind(message.created_at)
            .bind(message.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to save message", e))?;

        Ok(message)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DomainError> {
        let query = format!("SELECT {} FROM messages WHERE id = ? LIMIT 1", MESSAGE_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find message by id", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_message(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Message>, DomainError> {
        let query = format!(
            "SELECT {} FROM messages WHERE school_id = ? ORDER BY created_at DESC",
            MESSAGE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(school_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list messages", e))?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn update(&self, message: Message) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE messages
            SET title = ?, body = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&message.title)
            .bind(&message.body)
            .bind(Utc::now())
            .bind(message.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update message", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete message", e))?;

        Ok(result.rows_affected() > 0)
    }
}
