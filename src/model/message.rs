use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::PlantInfo;

/// Id given to the synthetic message that opens every conversation.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

/// Who authored a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry of the conversation log. Never edited once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    /// The assistant greeting that opens the conversation about `plant`.
    pub fn welcome(plant: &PlantInfo) -> Self {
        Self {
            id: WELCOME_MESSAGE_ID.to_string(),
            role: Role::Assistant,
            text: format!(
                "I've identified your plant as a {}! You can see the full care guide above. Do you have any specific questions about it?",
                plant.name
            ),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered message history for the active plant.
///
/// Insertion order is display order. The log only grows, except through
/// [`ConversationLog::reset`], which starts a new conversation and bumps the
/// epoch so late replies to the previous one can be told apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    messages: Vec<Message>,
    epoch: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard every message and seed the log with the welcome for `plant`.
    pub fn reset(&mut self, plant: &PlantInfo) {
        self.messages.clear();
        self.messages.push(Message::welcome(plant));
        self.epoch += 1;
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
