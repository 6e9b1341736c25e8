//! SQLite history store implementation.
//!
//! Implements `HistoryStore` from `lumi-core` using sqlx with split
//! read/write pools. Each session key maps to one row; the value column
//! holds the conversation as a JSON array of messages.

use chrono::Utc;
use sqlx::Row;
use tracing::warn;

use lumi_core::session::key::SessionKey;
use lumi_core::session::store::HistoryStore;
use lumi_types::chat::Message;
use lumi_types::error::StoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `HistoryStore`.
pub struct SqliteHistoryStore {
    pool: DatabasePool,
}

impl SqliteHistoryStore {
    /// Create a new history store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl HistoryStore for SqliteHistoryStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<Vec<Message>>, StoreError> {
        let row = sqlx::query("SELECT value FROM chat_history WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|e| StoreError::Query(e.to_string()))?;

        // A corrupt stored value is treated as absent: the session starts
        // over with a fresh greeting rather than failing.
        let messages: Vec<Message> = match serde_json::from_str(&value) {
            Ok(messages) => messages,
            Err(err) => {
                warn!(key = %key, error = %err, "stored history failed to parse; treating as absent");
                return Ok(None);
            }
        };

        if messages.is_empty() {
            return Ok(None);
        }

        Ok(Some(messages))
    }

    async fn save(&self, key: &SessionKey, messages: &[Message]) -> Result<(), StoreError> {
        let value = serde_json::to_string(messages)
            .map_err(|e| StoreError::Query(format!("failed to serialize history: {e}")))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO chat_history (key, value, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key.as_str())
        .bind(&value)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, key: &SessionKey) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM chat_history WHERE key = ?")
            .bind(key.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumi_types::chat::Attachment;
    use lumi_types::persona::Persona;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn girlfriend_key() -> SessionKey {
        SessionKey::for_persona(&Persona::Girlfriend)
    }

    #[tokio::test]
    async fn test_save_load_roundtrip() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool);
        let key = girlfriend_key();

        let messages = vec![
            Message::companion("Hey love… I missed you 💖"),
            Message::user("hi"),
            Message::user("look at this").with_attachment(Attachment {
                url: "https://files.example/cat.png".to_string(),
                media_type: "image/png".to_string(),
            }),
        ];
        store.save(&key, &messages).await.unwrap();

        let loaded = store.load(&key).await.unwrap().unwrap();
        assert_eq!(loaded, messages);
    }

    #[tokio::test]
    async fn test_load_absent_returns_none() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool);

        let loaded = store.load(&girlfriend_key()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool);
        let key = girlfriend_key();

        let messages = vec![Message::companion("hello"), Message::user("hey")];
        store.save(&key, &messages).await.unwrap();

        let first = store.load(&key).await.unwrap();
        let second = store.load(&key).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool);
        let key = girlfriend_key();

        store
            .save(&key, &[Message::companion("old")])
            .await
            .unwrap();
        store
            .save(&key, &[Message::companion("old"), Message::user("new")])
            .await
            .unwrap();

        let loaded = store.load(&key).await.unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].content, "new");
    }

    #[tokio::test]
    async fn test_empty_stored_array_is_absent() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool);
        let key = girlfriend_key();

        store.save(&key, &[]).await.unwrap();
        assert!(store.load(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_value_is_absent() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool.clone());
        let key = girlfriend_key();

        sqlx::query("INSERT INTO chat_history (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key.as_str())
            .bind("this is not json {")
            .bind(Utc::now().to_rfc3339())
            .execute(&pool.writer)
            .await
            .unwrap();

        assert!(store.load(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_history() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool);
        let key = girlfriend_key();

        store
            .save(&key, &[Message::companion("hello")])
            .await
            .unwrap();
        store.clear(&key).await.unwrap();

        assert!(store.load(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_personas_are_isolated() {
        let pool = test_pool().await;
        let store = SqliteHistoryStore::new(pool);
        let girlfriend = girlfriend_key();
        let custom = SessionKey::for_persona(&Persona::custom("Nova"));

        store
            .save(&girlfriend, &[Message::companion("hey love")])
            .await
            .unwrap();
        store
            .save(&custom, &[Message::companion("it's Nova")])
            .await
            .unwrap();

        let a = store.load(&girlfriend).await.unwrap().unwrap();
        let b = store.load(&custom).await.unwrap().unwrap();
        assert_eq!(a[0].content, "hey love");
        assert_eq!(b[0].content, "it's Nova");
    }
}
