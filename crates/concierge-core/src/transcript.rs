//! Conversation transcript

use serde::Serialize;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Concierge reply
    Bot,
    /// Echo of a user action
    User,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Per-session sequence number
    pub id: u64,
    /// Author
    pub role: Role,
    /// Text, may span lines
    pub text: String,
}

/// Ordered messages of a session
///
/// Ids keep increasing across [`Transcript::clear`].
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    /// Create empty transcript
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning a copy of it
    pub fn push(&mut self, role: Role, text: impl Into<String>) -> Message {
        let message = Message {
            id: self.next_id,
            role,
            text: text.into(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }

    /// All messages, oldest first
    #[inline]
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Most recent message
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Message count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if transcript is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop all messages
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
