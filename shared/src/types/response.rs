//! API response types and wrappers

use serde::{Deserialize, Serialize};

/// Simple message payload returned by endpoints without a resource body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable result message
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_response_round_trip() {
        let response = MessageResponse::new("tokens revoked");
        let json = serde_json::to_string(&response).unwrap();
        let back: MessageResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response, back);
    }
}
