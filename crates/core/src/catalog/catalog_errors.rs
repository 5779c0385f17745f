//! Catalog error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The requested portfolio id is not in the catalog.
    #[error("portfolio '{0}' is not available")]
    UnknownPortfolio(String),

    /// The catalog source could not be read at all.
    #[error("failed to read catalog: {0}")]
    Read(String),

    /// One data row could not be decoded. Rows are numbered from 1,
    /// excluding the header.
    #[error("catalog row {row}: {message}")]
    BadRow { row: usize, message: String },

    /// Two rows declared the same portfolio id.
    #[error("duplicate portfolio id '{0}' in catalog")]
    DuplicateId(String),
}
