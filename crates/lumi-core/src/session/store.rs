//! HistoryStore trait definition.
//!
//! Maps a session key to a persisted conversation. Implementations live in
//! `lumi-infra` (e.g., `SqliteHistoryStore`). Uses native async fn in traits
//! (RPITIT, Rust 2024 edition).

use lumi_types::chat::Message;
use lumi_types::error::StoreError;

use super::key::SessionKey;

/// Durable persistence for conversation history.
///
/// Writes are best-effort and non-transactional. Callers treat `save`
/// failures as non-fatal degradation: the in-memory conversation stays
/// usable for the rest of the session.
pub trait HistoryStore: Send + Sync {
    /// Load the stored conversation for a key.
    ///
    /// Returns `Ok(None)` when no history exists, when the stored value is
    /// empty, or when it fails to parse (a corrupt value is treated as
    /// absent, not as an error).
    fn load(
        &self,
        key: &SessionKey,
    ) -> impl std::future::Future<Output = Result<Option<Vec<Message>>, StoreError>> + Send;

    /// Overwrite the stored conversation for a key unconditionally.
    fn save(
        &self,
        key: &SessionKey,
        messages: &[Message],
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Remove the stored conversation for a key.
    fn clear(
        &self,
        key: &SessionKey,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
