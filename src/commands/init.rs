use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, its subdirectories and an initial `config.json` with default
/// settings.
///
/// # Arguments
/// - `home` - The directory that will be the root of data directory, e.g. `$HOME/gofinances`
///
/// # Errors
/// - Returns an error if any file operations fail or if `home` was already initialized.
pub async fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)
        .await
        .context("Unable to create the data directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the gofinances directory at {}",
        config.root().display()
    )
    .into())
}
