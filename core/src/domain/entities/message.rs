//! Message entity for intra-school communication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message posted by any authenticated user within their school
///
/// Ownership rule: only the authoring user may edit or delete a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: Uuid,

    /// User that authored the message
    pub sender_id: Uuid,

    /// School (tenant) the message belongs to
    pub school_id: Uuid,

    /// Message title
    pub title: String,

    /// Message body
    pub body: String,

    /// Timestamp when the message was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the message was last updated
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Creates a new message
    pub fn new(sender_id: Uuid, school_id: Uuid, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            sender_id,
            school_id,
            title,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces title and body
    pub fn edit(&mut self, title: String, body: String) {
        self.title = title;
        self.body = body;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_updates_fields() {
        let mut message = Message::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Sports day".to_string(),
            "Friday at 10".to_string(),
        );
        message.edit("Sports day moved".to_string(), "Monday at 10".to_string());
        assert_eq!(message.title, "Sports day moved");
    }
}
