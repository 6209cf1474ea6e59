use crate::aggregate::{sum_amounts, Aggregator};
use crate::model::{format_currency, Month, Transaction};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// One slice of the monthly expense chart.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub key: String,
    pub name: String,
    pub total: Decimal,
    pub total_formatted: String,
    pub color: String,
    /// Share of the month's expenses, rounded to a whole number, e.g. `42%`.
    pub percent: String,
}

impl Aggregator {
    /// Totals the expenses of `month` per category, in category list order.
    ///
    /// Categories without expenses that month are left out. Expenses filed under a key that is
    /// not in the category list count toward the month's total but get no slice of their own.
    /// When the month has no expenses the result is empty.
    pub fn category_summary(&self, records: &[Transaction], month: Month) -> Vec<CategoryTotal> {
        let expenses: Vec<&Transaction> = records
            .iter()
            .filter(|t| t.is_expense() && month.contains(self.local_date(t.date())))
            .collect();

        let month_total = sum_amounts(expenses.iter().map(|t| t.amount().value()));
        if month_total.is_zero() {
            return Vec::new();
        }

        let mut summary = Vec::new();
        for category in self.categories {
            let category_sum = sum_amounts(
                expenses
                    .iter()
                    .filter(|t| t.category() == category.key())
                    .map(|t| t.amount().value()),
            );
            if category_sum.is_zero() {
                continue;
            }

            summary.push(CategoryTotal {
                key: category.key().to_string(),
                name: category.name().to_string(),
                total: category_sum,
                total_formatted: format_currency(category_sum),
                color: category.color().to_string(),
                percent: percent(category_sum, month_total),
            });
        }
        summary
    }
}

/// `part / whole * 100` rounded half away from zero, with a `%` suffix. `whole` must be nonzero.
///
/// The ratio is taken first so that `part` is never scaled up.
fn percent(part: Decimal, whole: Decimal) -> String {
    let ratio = part.checked_div(whole).unwrap_or(Decimal::MAX);
    let share = ratio
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{share}%")
}
