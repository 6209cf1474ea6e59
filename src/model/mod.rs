//! Types that represent the core data model, such as `Transaction` and `Category`.
mod amount;
mod category;
mod month;
mod transaction;

pub use amount::{format_currency, Amount, AmountError};
pub use category::{find_category, require_category, Category, CATEGORIES, UNSELECTED_CATEGORY};
pub use month::Month;
pub use transaction::{Transaction, TransactionType, Transactions};
