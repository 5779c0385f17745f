//! Comparison report errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// A cell in a sign-classified row could not be read back as a number.
    #[error("statistic cell '{value}' in row '{row}' is not a parsable percentage")]
    MalformedStatCell { row: String, value: String },
}
