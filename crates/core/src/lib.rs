//! Smartfolio core - a model-portfolio ledger, valuation and comparison
//! engine.
//!
//! The engine records cash-denominated transactions (user buys and sells,
//! system rebalances) against named model portfolios that share one cash
//! pool per account. Every recorded transaction snapshots the value of each
//! sibling holding at the same instant, so all ledgers stay comparable on a
//! shared time axis. On top of the ledgers sit account-level aggregation
//! (summaries, transaction timelines) and benchmark comparison reports.
//!
//! Security-level math and the precomputed backtest dataset live behind the
//! [`backtest::PricingProviderTrait`] and [`backtest::BacktestDataTrait`]
//! seams, and persistence behind [`accounts::AccountStoreTrait`]; hosts wire
//! implementations at startup and share immutable reference data
//! ([`catalog::PortfolioCatalog`]) by `Arc` handle. Execution is
//! synchronous: one call does one unit of work, and the caller serializes
//! writes per account.

pub mod accounts;
pub mod backtest;
pub mod catalog;
pub mod comparison;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod utils;
pub mod valuation;

pub use errors::{Error, Result};
