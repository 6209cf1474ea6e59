use crate::aggregate::{Aggregator, Report};
use crate::args::ResumeArgs;
use crate::commands::{load, Out};
use crate::model::Month;
use crate::{Config, Result};
use chrono::{DateTime, FixedOffset, Utc};
use tracing::debug;

/// Summarizes expenses per category for the selected month.
///
/// The month is `args.month()` when given, otherwise the month containing `now` in `offset`. It
/// is then moved by `args.offset()` months.
pub async fn resume(
    config: Config,
    args: ResumeArgs,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Result<Out<Report>> {
    let aggregator = Aggregator::new(offset);
    let month = args
        .month()
        .unwrap_or_else(|| Month::containing(aggregator.local_date(now)))
        .add(args.offset());
    debug!("Summarizing {month}");

    let transactions = load(&config).await?;
    let report = aggregator.aggregate(transactions.data(), month);
    let message = if report.categories.is_empty() {
        format!("No expenses in {}", report.month_label)
    } else {
        let slices: Vec<String> = report
            .categories
            .iter()
            .map(|c| format!("{} {} ({})", c.name, c.total_formatted, c.percent))
            .collect();
        format!("{}: {}", report.month_label, slices.join(", "))
    };
    Ok(Out::new(message, report))
}
