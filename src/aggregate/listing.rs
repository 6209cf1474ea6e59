use crate::aggregate::Aggregator;
use crate::model::{find_category, Transaction, TransactionType};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fmt::{Debug, Display, Formatter};

/// A transaction as it appears in the dashboard list.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub name: String,
    /// Formatted amount; expenses are prefixed with `- `.
    pub amount: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub icon: String,
    /// `dd/mm/yyyy` in the aggregator's offset.
    pub date: String,
}

const HEADERS: [&str; 6] = ["Name", "Amount", "Type", "Category", "Date", "ID"];

impl TransactionRow {
    fn cells(&self) -> [String; 6] {
        [
            self.name.clone(),
            self.amount.clone(),
            self.transaction_type.to_string(),
            self.category.clone(),
            self.date.clone(),
            self.id.clone(),
        ]
    }
}

impl Aggregator {
    /// Builds one display row per record, in stored order.
    pub fn rows(&self, records: &[Transaction]) -> Vec<TransactionRow> {
        records.iter().map(|t| self.row(t)).collect()
    }

    fn row(&self, t: &Transaction) -> TransactionRow {
        let formatted = t.amount().to_currency();
        let amount = match t.transaction_type() {
            TransactionType::Positive => formatted,
            TransactionType::Negative => format!("- {formatted}"),
        };
        // Records may carry keys that are no longer in the category list.
        let (category, icon) = match find_category(t.category()) {
            Some(c) => (c.name().to_string(), c.icon().to_string()),
            None => (t.category().to_string(), String::new()),
        };
        TransactionRow {
            id: t.id().to_string(),
            name: t.name().to_string(),
            amount,
            transaction_type: t.transaction_type(),
            category,
            icon,
            date: self.local_date(t.date()).format("%d/%m/%Y").to_string(),
        }
    }
}

/// Listing rows in the requested output format.
#[derive(Clone, Serialize)]
#[serde(untagged)]
pub enum Rows {
    /// JSON array of row objects.
    Json(serde_json::Value),
    /// Markdown table as a single formatted string.
    Table(String),
    /// CSV data as a properly escaped string.
    Csv(String),
}

impl Rows {
    pub fn json(rows: &[TransactionRow]) -> Result<Self> {
        Ok(Rows::Json(
            serde_json::to_value(rows).context("Unable to serialize rows")?,
        ))
    }

    pub fn table(rows: &[TransactionRow]) -> Self {
        let cells: Vec<[String; 6]> = rows.iter().map(TransactionRow::cells).collect();
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |values: Vec<String>| -> String {
            let padded: Vec<String> = values
                .iter()
                .zip(widths.iter())
                .map(|(v, w)| format!("{v:<w$}"))
                .collect();
            format!("| {} |", padded.join(" | "))
        };

        let mut out = Vec::with_capacity(cells.len() + 2);
        out.push(line(HEADERS.iter().map(|h| h.to_string()).collect()));
        out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
        for row in cells {
            out.push(line(row.to_vec()));
        }
        Rows::Table(out.join("\n"))
    }

    pub fn csv(rows: &[TransactionRow]) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADERS)
            .context("Unable to write CSV header")?;
        for row in rows {
            writer
                .write_record(row.cells())
                .context("Unable to write CSV row")?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Unable to finish CSV output: {e}"))?;
        Ok(Rows::Csv(
            String::from_utf8(bytes).context("CSV output is not UTF-8")?,
        ))
    }
}

impl Debug for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => write!(f, "Rows::Json({:?})", v),
            Rows::Table(s) => write!(f, "Rows::Table({} chars)", s.len()),
            Rows::Csv(s) => write!(f, "Rows::Csv({} chars)", s.len()),
        }
    }
}

impl Display for Rows {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Rows::Json(v) => {
                if let Ok(s) = serde_json::to_string_pretty(v) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "{:?}", v)
                }
            }
            Rows::Table(s) => write!(f, "{}", s),
            Rows::Csv(s) => write!(f, "{}", s),
        }
    }
}
