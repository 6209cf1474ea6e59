//! Error types for the public command boundary.
//!
//! Internally everything is an `anyhow::Error` with context attached as it bubbles up. When an
//! error leaves a command handler it is tagged with an `ErrorType` so that callers can tell a
//! validation problem apart from a storage problem without parsing messages.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// The broad classes of failure that a command can report.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The data home or its `config.json` is missing or invalid.
    Config,
    /// The store could not be read, or its contents could not be parsed.
    StorageRead,
    /// The store could not be written.
    StorageWrite,
    /// The user supplied input that cannot be recorded.
    Validation,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error that has been classified with an `ErrorType`.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The alternate form prints the whole context chain.
        write!(f, "{} error: {:#}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Tags a result's error with an `ErrorType` on its way out of a command.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let e: anyhow::Error = e.into();
            // Keep the innermost classification if the error was already tagged.
            if e.downcast_ref::<Error>().is_some() {
                e
            } else {
                anyhow::Error::new(Error::new(error_type, e))
            }
        })
    }
}

/// Returns the `ErrorType` of an error if one was attached with `pub_result`.
pub fn error_type(e: &anyhow::Error) -> Option<ErrorType> {
    e.downcast_ref::<Error>().map(Error::error_type)
}
