use crate::llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// One turn of a chat conversation as carried inside the history token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Maps the stored role onto a model role; anything that is not the
    /// user's own turn is replayed as an assistant turn.
    pub fn to_chat_message(&self) -> ChatMessage {
        match self.role.to_ascii_lowercase().as_str() {
            "user" => ChatMessage::user(self.content.clone()),
            _ => ChatMessage::assistant(self.content.clone()),
        }
    }
}
