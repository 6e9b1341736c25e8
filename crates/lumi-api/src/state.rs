//! Application state wiring all services together.
//!
//! AppState holds the database pool and global config used by both the CLI
//! and the REST API. Core services are generic over store/responder traits;
//! the constructors here pin them to the concrete infra implementations.

use std::path::PathBuf;

use lumi_core::account::AccountStore;
use lumi_core::trial::TrialGate;
use lumi_infra::config::{load_global_config, resolve_data_dir};
use lumi_infra::gateway::GatewayClient;
use lumi_infra::sqlite::{DatabasePool, SqliteAccountStore, SqliteHistoryStore};
use lumi_types::config::GlobalConfig;
use lumi_types::error::StoreError;

/// Shared application state for CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabasePool,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: data dir, database, config.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("lumi.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = load_global_config(&data_dir).await;

        Ok(Self {
            db_pool,
            config,
            data_dir,
        })
    }

    pub fn history_store(&self) -> SqliteHistoryStore {
        SqliteHistoryStore::new(self.db_pool.clone())
    }

    pub fn account_store(&self) -> SqliteAccountStore {
        SqliteAccountStore::new(self.db_pool.clone())
    }

    pub fn gateway(&self) -> GatewayClient {
        GatewayClient::new(&self.config.gateway_url)
    }

    /// Build a trial gate seeded from the stored subscription state.
    pub async fn trial_gate(&self) -> Result<TrialGate, StoreError> {
        let account = self.account_store().get().await?;
        Ok(TrialGate::new(
            account.status,
            self.config.trial_message_limit,
            self.config.trial_warning_threshold,
        ))
    }
}
