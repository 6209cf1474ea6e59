use crate::commands::Out;
use crate::model::Transaction;
use crate::recorder::{record, NewTransaction};
use crate::{Config, Result};
use tracing::debug;

/// Validates and records a new transaction, returning the stored record.
///
/// Validation and storage failures are tagged by the recorder.
pub async fn register(config: Config, new: NewTransaction) -> Result<Out<Transaction>> {
    debug!("Registering {new:?}");
    let store = config.store();
    let transaction = record(&store, &new).await?;
    Ok(Out::new(
        format!(
            "Registered '{}' ({} {})",
            transaction.name(),
            transaction.transaction_type(),
            transaction.amount().to_currency()
        ),
        transaction,
    ))
}
