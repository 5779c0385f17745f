//! Accounts module - per-user account state, aggregation, and persistence
//! seams.

mod accounts_model;
mod accounts_service;
mod accounts_store;
mod accounts_traits;

#[cfg(test)]
mod accounts_service_tests;

// Re-export the public interface
pub use accounts_model::{
    AccountState, AccountSummary, AxisMarker, HoldingSummary, TransactionTimeline,
};
pub use accounts_service::AccountService;
pub use accounts_store::{JsonFileAccountStore, MemoryAccountStore};
pub use accounts_traits::{AccountServiceTrait, AccountStoreTrait};
