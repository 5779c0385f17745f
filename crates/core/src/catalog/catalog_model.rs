//! Catalog domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{BENCHMARK_ID_PREFIX, BENCHMARK_ID_SUFFIX};

/// One model portfolio as declared in the catalog.
///
/// Definitions are loaded once at startup and never mutated afterwards;
/// services share the catalog behind an `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDefinition {
    pub id: String,
    /// Display name shown in summaries and chart legends.
    pub name: String,
    /// Asset class label, e.g. "stocks" or "commodities".
    pub asset_type: String,
    /// Constituent instrument symbols, in catalog order.
    pub instruments: Vec<String>,
    /// Selection criteria label, e.g. "all_weather".
    pub criteria: String,
    /// Optimization model identifier, e.g. "max_ret".
    pub model: String,
    /// Raw comma-separated benchmark ids; may be empty.
    pub benchmark: String,
    /// Annual 99% value-at-risk from the backtest, in percent. Normally
    /// negative (a loss).
    pub annual_var_99: Decimal,
}

impl PortfolioDefinition {
    /// Benchmark series ids declared for this portfolio, in catalog order.
    ///
    /// Benchmarks live in the backtest dataset under their buy-and-hold ids,
    /// so a raw catalog entry `spy` maps to `bah_spy_bah`.
    pub fn benchmark_ids(&self) -> Vec<String> {
        self.benchmark
            .split(',')
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| format!("{}{}{}", BENCHMARK_ID_PREFIX, raw, BENCHMARK_ID_SUFFIX))
            .collect()
    }

    pub fn has_benchmarks(&self) -> bool {
        self.benchmark.split(',').any(|raw| !raw.trim().is_empty())
    }
}
