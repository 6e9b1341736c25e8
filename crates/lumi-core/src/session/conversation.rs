//! In-memory conversation state.
//!
//! An append-only ordered message list owned exclusively by the active
//! session. The trial counter is derived from it (count of user-authored
//! messages), never stored independently.

use lumi_types::chat::{Message, MessageRole};

use super::key::SessionKey;

/// The active conversation for one session.
pub struct Conversation {
    key: SessionKey,
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation from previously stored messages.
    pub fn new(key: SessionKey, messages: Vec<Message>) -> Self {
        Self { key, messages }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message, preserving insertion order.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Count of user-authored messages (the trial counter).
    pub fn user_message_count(&self) -> u32 {
        self.messages
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .count() as u32
    }

    /// Render the conversation as transcript text for the responder.
    ///
    /// One `<role>: <content>` line per message, in conversation order.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
