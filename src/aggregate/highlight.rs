use crate::aggregate::{sum_amounts, Aggregator};
use crate::model::{format_currency, Transaction, TransactionType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

/// The entries or expenses card: an all-time sum and when the latest one happened.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Highlight {
    pub amount: Decimal,
    pub amount_formatted: String,
    /// e.g. `Última entrada dia 13 de abril`. Absent when there are no matching records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transaction: Option<String>,
}

/// The net total card.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TotalHighlight {
    pub amount: Decimal,
    pub amount_formatted: String,
    /// e.g. `01 a 16 de abril`. Absent when there are no records at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Highlights {
    pub entries: Highlight,
    pub expensives: Highlight,
    pub total: TotalHighlight,
}

impl Aggregator {
    /// Sums every entry and every expense regardless of month. `total` is exactly
    /// `entries - expensives` unless the sums leave the `Decimal` range, in which case they clamp
    /// at its bounds.
    pub fn highlights(&self, records: &[Transaction]) -> Highlights {
        let entries = sum(records, TransactionType::Positive);
        let expensives = sum(records, TransactionType::Negative);
        let total = entries.checked_sub(expensives).unwrap_or_else(|| {
            warn!("The net total exceeds the representable range, clamping");
            entries.saturating_sub(expensives)
        });

        let last_entry = latest(records.iter().filter(|t| t.is_entry()));
        let last_expense = latest(records.iter().filter(|t| t.is_expense()));
        let last_any = latest(records.iter());

        Highlights {
            entries: Highlight {
                amount: entries,
                amount_formatted: format_currency(entries),
                last_transaction: last_entry
                    .map(|d| format!("Última entrada dia {}", self.day_of_month(d))),
            },
            expensives: Highlight {
                amount: expensives,
                amount_formatted: format_currency(expensives),
                last_transaction: last_expense
                    .map(|d| format!("Última saída dia {}", self.day_of_month(d))),
            },
            total: TotalHighlight {
                amount: total,
                amount_formatted: format_currency(total),
                interval: last_any.map(|d| format!("01 a {}", self.day_of_month(d))),
            },
        }
    }
}

fn sum(records: &[Transaction], transaction_type: TransactionType) -> Decimal {
    sum_amounts(
        records
            .iter()
            .filter(|t| t.transaction_type() == transaction_type)
            .map(|t| t.amount().value()),
    )
}

/// The most recent timestamp, or `None` for an empty iterator.
fn latest<'a>(records: impl Iterator<Item = &'a Transaction>) -> Option<DateTime<Utc>> {
    records.map(Transaction::date).max()
}
