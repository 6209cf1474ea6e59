//! The persistent key-value store and the transaction list it holds.
//!
//! The store maps string keys to string values. All transactions live as one JSON array under
//! `TRANSACTIONS_KEY`; readers load the whole list and writers replace the whole list.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{ErrorType, IntoResult};
use crate::model::Transactions;
use crate::Result;
use anyhow::Context;
use tracing::{debug, trace};

/// The key under which the transaction list is stored.
pub const TRANSACTIONS_KEY: &str = "@gofinances:transactions";

/// A minimal asynchronous key-value store.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Returns the value stored under `key`, or `None` if nothing has been stored there.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Reads the full transaction list. A missing key yields an empty list.
///
/// # Errors
/// - `ErrorType::StorageRead` if the store cannot be read or the stored value is not a valid list
///   of transactions.
pub async fn load_transactions(store: &dyn Store) -> Result<Transactions> {
    let raw = store
        .get_item(TRANSACTIONS_KEY)
        .await
        .context("Unable to read the transaction list")
        .pub_result(ErrorType::StorageRead)?;
    let transactions = match raw {
        None => {
            debug!("Nothing stored under {TRANSACTIONS_KEY}, starting with an empty list");
            Transactions::default()
        }
        Some(json) => serde_json::from_str(&json)
            .context("Unable to parse the stored transaction list")
            .pub_result(ErrorType::StorageRead)?,
    };
    trace!("Loaded {} transactions", transactions.len());
    Ok(transactions)
}

/// Replaces the stored transaction list with `transactions`.
///
/// # Errors
/// - `ErrorType::StorageWrite` if the list cannot be serialized or written.
pub async fn save_transactions(store: &dyn Store, transactions: &Transactions) -> Result<()> {
    let json = serde_json::to_string(transactions)
        .context("Unable to serialize the transaction list")
        .pub_result(ErrorType::StorageWrite)?;
    store
        .set_item(TRANSACTIONS_KEY, &json)
        .await
        .context("Unable to write the transaction list")
        .pub_result(ErrorType::StorageWrite)?;
    trace!("Saved {} transactions", transactions.len());
    Ok(())
}
