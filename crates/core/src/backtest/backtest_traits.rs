//! Trait seams for the external pricing and backtest-data providers.
//!
//! The engine owns ledgers and aggregation; all security-level math lives
//! behind these traits. Hosts inject implementations at startup, typically
//! backed by a precomputed backtest dataset.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::backtest_model::{PortfolioCalculation, ReturnSeries, StatsTable};
use crate::catalog::PortfolioDefinition;
use crate::errors::Result;
use crate::ledger::TransactionRecord;

/// Contract for the security-level pricing math.
pub trait PricingProviderTrait: Send + Sync {
    /// Prices a prospective transaction of `amount` cash against the
    /// portfolio described by `definition`, given the target ledger's
    /// pre-transaction history.
    ///
    /// The returned `invested_amount` is authoritative: it may be capped
    /// below the request (a sell larger than the position liquidates it) and
    /// the caller books the capped figure, not the requested one.
    fn calculate_portfolio(
        &self,
        amount: Decimal,
        prior_transactions: &[TransactionRecord],
        definition: &PortfolioDefinition,
        at_time: DateTime<Utc>,
    ) -> Result<PortfolioCalculation>;

    /// Values an ordered transaction history at `as_of` (now when `None`).
    ///
    /// Must behave as a pure function of its inputs: no side effects, and
    /// identical inputs yield identical output.
    fn calculate_current_value(
        &self,
        transactions: &[TransactionRecord],
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Decimal>;
}

/// Read-only access to the precomputed backtest dataset.
pub trait BacktestDataTrait: Send + Sync {
    /// Cumulative-return series for a portfolio or benchmark id.
    fn return_series(&self, portfolio_id: &str) -> Result<ReturnSeries>;

    /// Performance-statistics table for a portfolio or benchmark id.
    fn stats_table(&self, portfolio_id: &str) -> Result<StatsTable>;
}
