//! Validates and records new transactions.
//!
//! Recording is a read-modify-write of the whole stored list: the list is loaded, the new record
//! is appended, and the whole list is written back. Nothing is written unless the input is valid.

use crate::error::{ErrorType, IntoResult};
use crate::model::{require_category, Amount, Transaction, TransactionType, Transactions};
use crate::store::{load_transactions, save_transactions, Store};
use crate::Result;
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// The largest amount a single transaction may carry, in reais (one trillion).
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// The values a person fills in to record a transaction. Every field is raw input; nothing is
/// checked until `validate` or `record` is called.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct NewTransaction {
    pub name: String,
    pub amount: String,
    /// `None` until a direction has been picked.
    pub transaction_type: Option<TransactionType>,
    /// A category key. The sentinel `category` means no category was picked.
    pub category: String,
}

impl NewTransaction {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        transaction_type: TransactionType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            transaction_type: Some(transaction_type),
            category: category.into(),
        }
    }
}

/// A `NewTransaction` that passed validation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ValidTransaction {
    name: String,
    amount: Amount,
    transaction_type: TransactionType,
    category: &'static str,
}

impl ValidTransaction {
    /// Stamps the validated values with an id and a timestamp.
    pub fn into_transaction(self, id: impl Into<String>, date: DateTime<Utc>) -> Transaction {
        Transaction::new(
            id,
            self.name,
            self.amount,
            self.transaction_type,
            self.category,
            date,
        )
    }
}

/// Checks `new` the same way the registration form does.
///
/// # Errors
/// - `ErrorType::Validation` when the name is empty, the amount is not a positive number or is
///   above `MAX_AMOUNT`, no type was picked, or the category is missing or unknown.
pub fn validate(new: &NewTransaction) -> Result<ValidTransaction> {
    validate_inner(new).pub_result(ErrorType::Validation)
}

fn validate_inner(new: &NewTransaction) -> Result<ValidTransaction> {
    let name = new.name.trim();
    if name.is_empty() {
        bail!("Name is required");
    }

    if new.amount.trim().is_empty() {
        bail!("Amount is required");
    }
    let amount = Amount::from_str(&new.amount).context("Enter a numeric value")?;
    if !amount.is_positive() {
        bail!("The amount must be greater than zero");
    }
    if amount.value() > Decimal::from(MAX_AMOUNT) {
        bail!(
            "The amount must not exceed {}",
            Amount::new(Decimal::from(MAX_AMOUNT)).to_currency()
        );
    }

    let transaction_type = match new.transaction_type {
        Some(t) => t,
        None => bail!("Select the transaction type"),
    };

    let category = require_category(&new.category)?;

    Ok(ValidTransaction {
        name: name.to_string(),
        amount,
        transaction_type,
        category: category.key(),
    })
}

/// Validates `new`, stamps it with a fresh UUID and the current time, and appends it to the
/// stored list. Returns the recorded transaction.
///
/// # Errors
/// - `ErrorType::Validation` if `new` is invalid. The store is not touched.
/// - `ErrorType::StorageRead` / `ErrorType::StorageWrite` if the store fails. The stored list is
///   left as it was.
pub async fn record(store: &dyn Store, new: &NewTransaction) -> Result<Transaction> {
    record_with(store, new, Uuid::new_v4().to_string(), Utc::now()).await
}

/// Like `record` but with a caller-supplied id and timestamp.
pub async fn record_with(
    store: &dyn Store,
    new: &NewTransaction,
    id: impl Into<String>,
    date: DateTime<Utc>,
) -> Result<Transaction> {
    let valid = validate(new)?;
    let transaction = valid.into_transaction(id, date);

    let mut transactions: Transactions = load_transactions(store).await?;
    transactions.push(transaction.clone());
    save_transactions(store, &transactions).await?;

    debug!(
        "Recorded transaction {} ({} records stored)",
        transaction.id(),
        transactions.len()
    );
    Ok(transaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::model::UNSELECTED_CATEGORY;
    use crate::store::{MemoryStore, TRANSACTIONS_KEY};
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn valid_input() -> NewTransaction {
        NewTransaction::new("Pizza", "59.90", TransactionType::Negative, "food")
    }

    fn assert_validation(new: NewTransaction, message: &str) {
        let e = validate(&new).unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::Validation));
        assert!(
            format!("{e:#}").contains(message),
            "expected '{message}' in '{e:#}'"
        );
    }

    #[test]
    fn test_validate_ok() {
        let valid = validate(&valid_input()).unwrap();
        let when = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let t = valid.into_transaction("x", when);
        assert_eq!(t.name(), "Pizza");
        assert_eq!(t.amount().value(), Decimal::new(5990, 2));
        assert_eq!(t.category(), "food");
        assert_eq!(t.date(), when);
    }

    #[test]
    fn test_validate_trims_name() {
        let mut new = valid_input();
        new.name = "  Pizza  ".to_string();
        let t = validate(&new).unwrap().into_transaction("x", Utc::now());
        assert_eq!(t.name(), "Pizza");
    }

    #[test]
    fn test_validate_missing_name() {
        let mut new = valid_input();
        new.name = "   ".to_string();
        assert_validation(new, "Name is required");
    }

    #[test]
    fn test_validate_missing_amount() {
        let mut new = valid_input();
        new.amount = String::new();
        assert_validation(new, "Amount is required");
    }

    #[test]
    fn test_validate_non_numeric_amount() {
        let mut new = valid_input();
        new.amount = "lots".to_string();
        assert_validation(new, "Enter a numeric value");
    }

    #[test]
    fn test_validate_non_positive_amount() {
        let mut new = valid_input();
        new.amount = "-10".to_string();
        assert_validation(new.clone(), "greater than zero");
        new.amount = "0".to_string();
        assert_validation(new, "greater than zero");
    }

    #[test]
    fn test_validate_amount_limit() {
        let mut new = valid_input();
        new.amount = MAX_AMOUNT.to_string();
        assert!(validate(&new).is_ok());
        new.amount = "1000000000000.01".to_string();
        assert_validation(new.clone(), "must not exceed R$ 1.000.000.000.000,00");
        new.amount = "1000000000000000000000000000".to_string();
        assert_validation(new, "must not exceed");
    }

    #[tokio::test]
    async fn test_record_rejects_huge_amount() {
        let store = MemoryStore::new();
        let huge = NewTransaction::new(
            "Yacht",
            "1000000000000000000000000000",
            TransactionType::Negative,
            "food",
        );
        let e = record(&store, &huge).await.unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::Validation));
        assert!(store.get(TRANSACTIONS_KEY).is_none());
    }

    #[test]
    fn test_validate_missing_type() {
        let mut new = valid_input();
        new.transaction_type = None;
        assert_validation(new, "Select the transaction type");
    }

    #[test]
    fn test_validate_unselected_category() {
        let mut new = valid_input();
        new.category = UNSELECTED_CATEGORY.to_string();
        assert_validation(new, "Select a category");
    }

    #[test]
    fn test_validate_unknown_category() {
        let mut new = valid_input();
        new.category = "rent".to_string();
        assert_validation(new, "Unknown category");
    }

    #[tokio::test]
    async fn test_record_appends_last() {
        let store = MemoryStore::new();
        let first = record(&store, &valid_input()).await.unwrap();
        let second_input = NewTransaction::new("Salário", "5000", TransactionType::Positive, "salary");
        let second = record(&store, &second_input).await.unwrap();

        let list = load_transactions(&store).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.data()[0], first);
        assert_eq!(list.last(), Some(&second));
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_record_with_id_and_date() {
        let store = MemoryStore::new();
        let when = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let t = record_with(&store, &valid_input(), "fixed-id", when)
            .await
            .unwrap();
        assert_eq!(t.id(), "fixed-id");
        assert_eq!(t.date(), when);
        assert_eq!(load_transactions(&store).await.unwrap().last(), Some(&t));
    }

    #[tokio::test]
    async fn test_invalid_input_does_not_touch_store() {
        let store = MemoryStore::new();
        // A store read would fail, so reaching the store would change the error type.
        store.fail_reads(true);
        let mut new = valid_input();
        new.category = UNSELECTED_CATEGORY.to_string();
        let e = record(&store, &new).await.unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::Validation));
        assert!(store.get(TRANSACTIONS_KEY).is_none());
    }

    #[tokio::test]
    async fn test_read_failure_leaves_store_unchanged() {
        let store = MemoryStore::new();
        record(&store, &valid_input()).await.unwrap();
        let before = store.get(TRANSACTIONS_KEY);
        store.fail_reads(true);
        let e = record(&store, &valid_input()).await.unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::StorageRead));
        assert_eq!(store.get(TRANSACTIONS_KEY), before);
    }

    #[tokio::test]
    async fn test_write_failure_leaves_store_unchanged() {
        let store = MemoryStore::new();
        record(&store, &valid_input()).await.unwrap();
        let before = store.get(TRANSACTIONS_KEY);
        store.fail_writes(true);
        let e = record(&store, &valid_input()).await.unwrap_err();
        assert_eq!(error_type(&e), Some(ErrorType::StorageWrite));
        assert_eq!(store.get(TRANSACTIONS_KEY), before);
    }
}
