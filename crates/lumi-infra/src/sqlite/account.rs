//! SQLite account store implementation.
//!
//! The account table holds a single row (id = 1). Reads of a missing row
//! return the default trial account.

use chrono::{DateTime, Utc};
use sqlx::Row;

use lumi_core::account::AccountStore;
use lumi_types::billing::{Account, SubscriptionStatus};
use lumi_types::error::StoreError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `AccountStore`.
pub struct SqliteAccountStore {
    pool: DatabasePool,
}

impl SqliteAccountStore {
    /// Create a new account store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Insert the default row if none exists yet.
    async fn ensure_row(&self) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT OR IGNORE INTO account (id, email, display_name, subscribed, updated_at) VALUES (1, NULL, NULL, 0, ?)",
        )
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl AccountStore for SqliteAccountStore {
    async fn get(&self) -> Result<Account, StoreError> {
        let row = sqlx::query(
            "SELECT email, display_name, subscribed, updated_at FROM account WHERE id = 1",
        )
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(Account::default());
        };

        let subscribed: i64 = row
            .try_get("subscribed")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        let updated_at: String = row
            .try_get("updated_at")
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(Account {
            email: row
                .try_get("email")
                .map_err(|e| StoreError::Query(e.to_string()))?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| StoreError::Query(e.to_string()))?,
            status: if subscribed != 0 {
                SubscriptionStatus::Subscribed
            } else {
                SubscriptionStatus::Trial
            },
            updated_at: parse_datetime(&updated_at),
        })
    }

    async fn set_profile(
        &self,
        email: Option<&str>,
        display_name: Option<&str>,
    ) -> Result<(), StoreError> {
        self.ensure_row().await?;
        sqlx::query("UPDATE account SET email = ?, display_name = ?, updated_at = ? WHERE id = 1")
            .bind(email)
            .bind(display_name)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }

    async fn set_subscribed(&self, subscribed: bool) -> Result<(), StoreError> {
        self.ensure_row().await?;
        sqlx::query("UPDATE account SET subscribed = ?, updated_at = ? WHERE id = 1")
            .bind(subscribed as i64)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }
}
