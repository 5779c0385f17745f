//! Backtest module - wire models and trait seams for the external pricing
//! provider and the precomputed backtest dataset.

mod backtest_errors;
mod backtest_model;
mod backtest_traits;


// Re-export the public interface
pub use backtest_errors::ProviderError;
pub use backtest_model::{
    InstrumentAllocation, PortfolioCalculation, ReturnPoint, ReturnSeries, StatsRow, StatsTable,
};
pub use backtest_traits::{BacktestDataTrait, PricingProviderTrait};
