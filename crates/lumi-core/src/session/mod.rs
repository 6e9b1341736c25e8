//! Conversation session management.
//!
//! A session is one active conversation with one persona. The session key
//! namespaces persisted history, the conversation holds the ordered message
//! list, the store trait provides durable persistence, and the service wires
//! them together with the trial gate and responder boundary.

pub mod conversation;
pub mod key;
pub mod service;
pub mod store;

pub use conversation::Conversation;
pub use key::SessionKey;
pub use service::{SessionService, TurnOutcome};
pub use store::HistoryStore;
