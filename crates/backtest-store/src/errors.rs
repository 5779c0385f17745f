//! Store-specific error types for dataset loading.
//!
//! These errors are internal to the store layer and are converted to
//! `smartfolio_core::Error` before being returned to callers.

use smartfolio_core::Error;
use thiserror::Error as ThisError;

/// Failures while reading or decoding a backtest dataset file.
#[derive(ThisError, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dataset file not found: {0}")]
    NotFound(String),
}

impl From<DatasetError> for Error {
    fn from(err: DatasetError) -> Self {
        Error::Store(err.to_string())
    }
}
