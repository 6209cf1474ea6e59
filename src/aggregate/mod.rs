//! Derives the dashboard numbers from the stored transaction list.
//!
//! Everything here is a pure function of the records, the selected month and the UTC offset the
//! aggregator was built with. The clock is never read and nothing is cached.

mod breakdown;
mod highlight;
mod listing;

pub use breakdown::CategoryTotal;
pub use highlight::{Highlight, Highlights, TotalHighlight};
pub use listing::{Rows, TransactionRow};

use crate::model::{Category, Month, Transaction, CATEGORIES};
use chrono::{DateTime, FixedOffset, Locale, NaiveDate, Offset, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

/// Everything the dashboard and the monthly summary show for one selected month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Report {
    pub highlights: Highlights,
    pub month: Month,
    pub month_label: String,
    pub categories: Vec<CategoryTotal>,
}

/// Computes highlights, per-category monthly totals and listing rows.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    categories: &'static [Category],
    offset: FixedOffset,
}

impl Default for Aggregator {
    /// Uses the built-in category list and UTC.
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl Aggregator {
    /// An aggregator over the built-in category list that buckets dates in `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self::with_categories(CATEGORIES, offset)
    }

    pub fn with_categories(categories: &'static [Category], offset: FixedOffset) -> Self {
        Self { categories, offset }
    }

    pub fn categories(&self) -> &'static [Category] {
        self.categories
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Computes the all-time highlights and the category summary for `month`.
    pub fn aggregate(&self, records: &[Transaction], month: Month) -> Report {
        Report {
            highlights: self.highlights(records),
            month,
            month_label: month.label(),
            categories: self.category_summary(records, month),
        }
    }

    /// The calendar date of `date` in this aggregator's offset.
    pub fn local_date(&self, date: DateTime<Utc>) -> NaiveDate {
        date.with_timezone(&self.offset).date_naive()
    }

    /// `date` as "day of month", e.g. `13 de abril`.
    fn day_of_month(&self, date: DateTime<Utc>) -> String {
        self.local_date(date)
            .format_localized("%-d de %B", Locale::pt_BR)
            .to_string()
    }
}

/// Adds up `values`, clamping at the `Decimal` bounds instead of overflowing.
fn sum_amounts(values: impl Iterator<Item = Decimal>) -> Decimal {
    let mut overflowed = false;
    let total = values.fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).unwrap_or_else(|| {
            overflowed = true;
            acc.saturating_add(value)
        })
    });
    if overflowed {
        warn!("Transaction amounts exceed the largest representable total, clamping to {total}");
    }
    total
}
