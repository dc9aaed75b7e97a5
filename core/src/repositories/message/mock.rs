//! In-memory implementation of MessageRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::message::Message;
use crate::errors::DomainError;

use super::r#trait::MessageRepository;

/// Mock message repository backed by a HashMap keyed on message id
pub struct MockMessageRepository {
    messages: Arc<RwLock<HashMap<Uuid, Message>>>,
}

impl MockMessageRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn save(&self, message: Message) -> Result<Message, DomainError> {
        let mut messages = self.messages.write().await;
        messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Message>, DomainError> {
        Ok(self.messages.read().await.get(&id).cloned())
    }

    async fn find_all_by_school(&self, school_id: Uuid) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;
        let mut result: Vec<Message> = messages
            .values()
            .filter(|m| m.school_id == school_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn update(&self, message: Message) -> Result<bool, DomainError> {
        let mut messages = self.messages.write().await;
        match messages.get_mut(&message.id) {
            Some(existing) => {
                *existing = message;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.messages.write().await.remove(&id).is_some())
    }
}
