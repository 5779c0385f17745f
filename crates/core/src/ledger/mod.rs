//! Ledger module - the append-only transaction history behind every held
//! portfolio, and the service that records into it.

mod ledger_errors;
mod ledger_model;
mod ledger_seed;
mod ledger_service;

#[cfg(test)]
mod ledger_model_tests;

// Re-export the public interface
pub use ledger_errors::LedgerError;
pub use ledger_model::{
    PortfolioHolding, TransactionKind, TransactionReceipt, TransactionRecord, TransactionRequest,
};
pub use ledger_seed::{SeedEntry, SeedScript, SEED_CRB_ID, SEED_MAX_RET_ID};
pub use ledger_service::{LedgerService, LedgerServiceTrait};
