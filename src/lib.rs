pub mod aggregate;
pub mod args;
mod backup;
pub mod commands;
mod config;
pub mod error;
pub mod model;
pub mod recorder;
pub mod store;
mod utils;

#[cfg(test)]
mod test;

pub use backup::Backup;
pub use config::Config;
pub use error::{Error, ErrorType, Result};
