use crate::aggregate::{Aggregator, Rows};
use crate::args::{ListArgs, OutputFormat};
use crate::commands::{load, Out};
use crate::{Config, Result};
use chrono::FixedOffset;

/// Lists every stored transaction in the requested format, oldest first.
pub async fn list(config: Config, args: ListArgs, offset: FixedOffset) -> Result<Out<Rows>> {
    let transactions = load(&config).await?;
    let rows = Aggregator::new(offset).rows(transactions.data());
    let count = rows.len();
    let rows = match args.format() {
        OutputFormat::Json => Rows::json(&rows)?,
        OutputFormat::Table => Rows::table(&rows),
        OutputFormat::Csv => Rows::csv(&rows)?,
    };
    Ok(Out::new(format!("{count} transactions"), rows))
}
