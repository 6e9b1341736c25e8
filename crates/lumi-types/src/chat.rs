//! Conversation message types for Lumi.
//!
//! A conversation is an ordered sequence of [`Message`] values. The serde
//! shapes here are also the persisted wire format: stored history is a JSON
//! array of messages under a `lumiMessages_*` key.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Author of a message within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Companion,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Companion => write!(f, "companion"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "companion" => Ok(MessageRole::Companion),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A file attached to a message (image, audio clip, etc.).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub url: String,
    pub media_type: String,
}

/// A single message in a conversation.
///
/// Immutable once created. Ordering within a conversation is insertion
/// order, which is conversation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Message {
    /// Create a user-authored message without an attachment.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            attachment: None,
        }
    }

    /// Create a companion-authored message.
    pub fn companion(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Companion,
            content: content.into(),
            attachment: None,
        }
    }

    /// Attach a file to this message.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Emoji and image suggestions derived from the companion's emotional state.
///
/// Returned by the expressive-suggestion boundary; empty on error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressiveSuggestions {
    pub emoji_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_suggestion: Option<String>,
}
