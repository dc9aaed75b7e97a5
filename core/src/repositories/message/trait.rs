//! Message repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::message::Message;
use crate::errors::DomainError;

/// Repository trait for Message persistence operations
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a new message
    async fn save(&self, message: Message) -> Result<Message, DomainError>;

    /// Find a message by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DomainError>;

    /// List all messages of a school, newest first
    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Message>, DomainError>;

    /// Replace the stored message with the given state
    async fn update(&self, message: Message) -> Result<bool, DomainError>;

    /// Delete a message by id
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
