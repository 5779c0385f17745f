//! Core error types for the Smartfolio engine.
//!
//! This module defines storage-agnostic error types. Host-specific failures
//! (file stores, dataset loaders, etc.) are converted to these types at the
//! boundary, usually through `Error::Store`.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::backtest::ProviderError;
use crate::catalog::CatalogError;
use crate::comparison::ReportError;
use crate::ledger::LedgerError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
///
/// Module-level errors are wrapped here so service signatures stay uniform;
/// external-store errors are carried in string form to keep this type
/// storage-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog operation failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Pricing provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Comparison report failed: {0}")]
    Report(#[from] ReportError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Account store error: {0}")]
    Store(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
