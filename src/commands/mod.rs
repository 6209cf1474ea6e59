//! Command handlers for the gofin CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod categories;
mod dashboard;
mod init;
mod list;
mod register;
mod resume;

use crate::model::Transactions;
use crate::store::load_transactions;
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::{Debug, Display};
use tracing::{debug, info};

pub use categories::categories;
pub use dashboard::dashboard;
pub use init::init;
pub use list::list;
pub use register::register;
pub use resume::resume;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as pretty JSON to
    /// stdout.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            match serde_json::to_string_pretty(structure) {
                Ok(json) => println!("{json}"),
                Err(e) => debug!("Unable to serialize command output: {e}"),
            }
        }
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug + Display,
{
    /// Print the message to `info!` and the structured data (if it exists) to stdout using its
    /// `Display` implementation.
    pub fn print_display(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            println!("{structure}");
        }
    }
}

/// Loads the stored transaction list through the store configured in `config`.
async fn load(config: &Config) -> Result<Transactions> {
    let store = config.store();
    let transactions = load_transactions(&store).await?;
    debug!(
        "Loaded {} transactions from {}",
        transactions.len(),
        config.storage().display()
    );
    Ok(transactions)
}
