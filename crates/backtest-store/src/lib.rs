//! File-backed backtest store for Smartfolio.
//!
//! This crate implements the data-provider traits defined in
//! `smartfolio-core` on top of a precomputed backtest dataset:
//! - [`BacktestDataset`] loads cumulative-return series and
//!   performance-statistics tables from one JSON document and serves them
//!   through `BacktestDataTrait`.
//! - [`SeriesPricingProvider`] fulfils `PricingProviderTrait` by replaying
//!   cash movements along those series, which is enough to drive the ledger,
//!   valuation and comparison services end to end without any security-level
//!   math.
//!
//! # Architecture
//!
//! ```text
//! core (ledger, valuation, comparison)
//!                 │  PricingProviderTrait / BacktestDataTrait
//!                 ▼
//!      backtest-store (this crate)
//!                 │
//!                 ▼
//!         backtest.json dataset
//! ```
//!
//! The dataset is immutable after load; hosts share it as an `Arc` between
//! the provider and the services that read statistics directly.

pub mod dataset;
pub mod errors;
pub mod series_provider;

// Re-export the public interface
pub use dataset::BacktestDataset;
pub use errors::DatasetError;
pub use series_provider::SeriesPricingProvider;
