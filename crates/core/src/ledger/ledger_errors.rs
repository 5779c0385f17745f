//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::ledger_model::TransactionKind;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// A buy larger than the available cash pool. Withdrawals are negative
    /// and therefore never trip this.
    #[error("investment of {requested} is not possible with only {available} available")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// Cross-marks are engine-generated and cannot be requested directly.
    #[error("transaction kind {0} is reserved for engine-generated records")]
    ReservedKind(TransactionKind),
}
