//! These structs provide the CLI interface for the gofin CLI.

use crate::model::{Month, TransactionType, UNSELECTED_CATEGORY};
use crate::recorder::NewTransaction;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// gofin: A command-line tool for tracking personal income and expenses.
///
/// Record each income or expense with `gofin register`, then look at your all-time totals with
/// `gofin dashboard` and at where the money went in a given month with `gofin resume`.
///
/// All data lives in a single directory, `~/gofinances` by default. Run `gofin init` once to
/// create it.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. If you want your data somewhere other than
    /// $HOME/gofinances, pass --home or set GOFIN_HOME.
    Init,
    /// Record a new income or expense.
    Register(RegisterArgs),
    /// List every recorded transaction, oldest first.
    List(ListArgs),
    /// Show total entries, total expenses and the balance.
    Dashboard,
    /// Show how a month's expenses split across categories.
    Resume(ResumeArgs),
    /// Show the categories a transaction can be filed under.
    Categories,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where gofinances data and configuration is held. Defaults to ~/gofinances
    #[arg(long, env = "GOFIN_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `gofin register` command.
#[derive(Debug, Parser, Clone)]
pub struct RegisterArgs {
    /// What the money was for, e.g. "Hamburgueria Pizzy".
    #[arg(long)]
    name: String,

    /// A positive number, e.g. 59.90. Use --type to say whether it came in or went out.
    #[arg(long)]
    amount: String,

    /// positive (alias: income) or negative (alias: outcome).
    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,

    /// The category key, see `gofin categories`.
    #[arg(long)]
    category: Option<String>,
}

impl RegisterArgs {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        transaction_type: Option<TransactionType>,
        category: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            transaction_type,
            category,
        }
    }

    /// The form values as a `NewTransaction`. A missing category becomes the unselected sentinel.
    pub fn new_transaction(&self) -> NewTransaction {
        NewTransaction {
            name: self.name.clone(),
            amount: self.amount.clone(),
            transaction_type: self.transaction_type,
            category: self
                .category
                .clone()
                .unwrap_or_else(|| UNSELECTED_CATEGORY.to_string()),
        }
    }
}

/// Output formats for `gofin list`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    /// A Markdown table.
    Table,
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Args for the `gofin list` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListArgs {
    /// How to print the rows.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

impl ListArgs {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// Args for the `gofin resume` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ResumeArgs {
    /// The month to summarize, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<Month>,

    /// Move this many months from --month: -1 for the previous month, 1 for the next.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i32,
}

impl ResumeArgs {
    pub fn new(month: Option<Month>, offset: i32) -> Self {
        Self { month, offset }
    }

    pub fn month(&self) -> Option<Month> {
        self.month
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("gofinances"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or GOFIN_HOME instead of relying on the default data \
                directory. If you continue using the program right now, you may have problems!",
            );
            PathBuf::from("gofinances")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
