use crate::model::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The direction of a transaction: money coming in or money going out.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Income, shown as an entry.
    #[value(alias = "income")]
    Positive,
    /// Outcome, shown as an expense.
    #[value(alias = "outcome")]
    Negative,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

/// One stored transaction record.
///
/// The serialized form is the record layout of the stored list:
/// ```json
/// {
///   "id": "3f0c9a4e-5a47-4d5b-9f3e-2b4c1c1e8d7a",
///   "name": "Hamburgueria Pizzy",
///   "amount": "59",
///   "type": "negative",
///   "category": "food",
///   "date": "2021-04-10T15:20:00.000Z"
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
    name: String,
    amount: Amount,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    category: String,
    date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: Amount,
        transaction_type: TransactionType,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            transaction_type,
            category: category.into(),
            date,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn is_entry(&self) -> bool {
        self.transaction_type == TransactionType::Positive
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Negative
    }
}

/// The stored list of transactions, in insertion order.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transactions(Vec<Transaction>);

impl Transactions {
    pub fn new(data: Vec<Transaction>) -> Self {
        Self(data)
    }

    pub fn data(&self) -> &[Transaction] {
        &self.0
    }

    pub fn push(&mut self, transaction: Transaction) {
        self.0.push(transaction)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Transaction> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.0.iter()
    }
}

impl From<Vec<Transaction>> for Transactions {
    fn from(value: Vec<Transaction>) -> Self {
        Self(value)
    }
}

impl<'a> IntoIterator for &'a Transactions {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_stored_record() {
        let json = r#"{
            "id": "abc",
            "name": "Desenvolvimento de site",
            "amount": "12000",
            "type": "positive",
            "category": "salary",
            "date": "2021-04-13T10:00:00.000Z"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.id(), "abc");
        assert_eq!(t.amount(), Amount::from_str("12000").unwrap());
        assert!(t.is_entry());
        assert!(!t.is_expense());
        assert_eq!(t.category(), "salary");
        assert_eq!(t.date(), Utc.with_ymd_and_hms(2021, 4, 13, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_deserialize_numeric_amount() {
        let json = r#"[{"id":"1","name":"x","amount":59,"type":"negative","category":"food",
            "date":"2021-04-10T00:00:00Z"}]"#;
        let list: Transactions = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.data()[0].is_expense());
    }

    #[test]
    fn test_serialize_field_names() {
        let t = Transaction::new(
            "1",
            "Aluguel",
            Amount::from_str("1200").unwrap(),
            TransactionType::Negative,
            "purchases",
            Utc.with_ymd_and_hms(2021, 4, 10, 0, 0, 0).unwrap(),
        );
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["type"], "negative");
        assert_eq!(value["amount"], "1200");
        assert_eq!(value["category"], "purchases");
        assert_eq!(value["date"], "2021-04-10T00:00:00Z");
    }

    #[test]
    fn test_unknown_type_fails() {
        let json = r#"{"id":"1","name":"x","amount":"1","type":"sideways","category":"food",
            "date":"2021-04-10T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_transaction_type_display() {
        assert_eq!(TransactionType::Positive.to_string(), "positive");
        assert_eq!(
            TransactionType::from_str("negative").unwrap(),
            TransactionType::Negative
        );
    }
}
