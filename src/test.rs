//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{Transaction, Transactions};
use crate::store::{load_transactions, save_transactions};
use crate::Config;
use tempfile::TempDir;

/// Test environment that sets up a gofinances home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with an initialized data home.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("gofinances");
        let config = Config::create(&root).await.unwrap();

        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Replaces the stored transaction list with `records`.
    pub async fn seed(&self, records: Vec<Transaction>) {
        let store = self.config.store();
        save_transactions(&store, &Transactions::from(records))
            .await
            .unwrap();
    }

    /// Reads back the stored transaction list.
    pub async fn transactions(&self) -> Transactions {
        load_transactions(&self.config.store()).await.unwrap()
    }
}
