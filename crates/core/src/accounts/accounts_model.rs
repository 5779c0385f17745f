//! Account domain models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::PortfolioHolding;
use crate::valuation::ChartSeries;

/// Mutable per-user account state: one shared cash pool plus every held
/// model portfolio.
///
/// Holdings live in a sorted map so cross-mark broadcast order and persisted
/// JSON stay deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountState {
    pub user_id: String,
    /// Cash available for new investments.
    pub available_cash: Decimal,
    /// Lifetime cash transferred into the account.
    pub asset_transfers: Decimal,
    /// Cached sum of holding values; refreshed whenever the account is
    /// summarized.
    pub gross_asset_value: Decimal,
    pub holdings: BTreeMap<String, PortfolioHolding>,
}

impl AccountState {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            available_cash: Decimal::ZERO,
            asset_transfers: Decimal::ZERO,
            gross_asset_value: Decimal::ZERO,
            holdings: BTreeMap::new(),
        }
    }

    /// The holding for `portfolio_id`, if any cash ever moved into it.
    pub fn holding(&self, portfolio_id: &str) -> Option<&PortfolioHolding> {
        self.holdings.get(portfolio_id)
    }

    /// The holding for `portfolio_id`, created empty on first use.
    pub fn holding_mut(&mut self, portfolio_id: &str) -> &mut PortfolioHolding {
        self.holdings.entry(portfolio_id.to_string()).or_default()
    }

    /// Zeroes every balance and drops all holdings; the in-memory half of
    /// the reset operation.
    pub fn clear(&mut self) {
        self.available_cash = Decimal::ZERO;
        self.asset_transfers = Decimal::ZERO;
        self.gross_asset_value = Decimal::ZERO;
        self.holdings.clear();
    }
}

/// Aggregated account view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub user_id: String,
    /// Gross asset value plus available cash.
    pub account_total: Decimal,
    /// Account total minus lifetime transfers. Derived on every call, never
    /// stored.
    pub earnings_total: Decimal,
    pub gross_asset_value: Decimal,
    pub available_cash: Decimal,
    pub asset_transfers: Decimal,
    pub holdings: Vec<HoldingSummary>,
}

/// One holding line of the account summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingSummary {
    pub portfolio_id: String,
    pub name: String,
    pub asset_type: String,
    pub total_invested: Decimal,
    pub current_value: Decimal,
    /// `current_value - total_invested`.
    pub earnings: Decimal,
    /// Annual 99% VaR magnitude for display, floored at 5 percent.
    pub risk_pct: Decimal,
    /// Human sentence describing `risk_pct`.
    pub risk_summary: String,
}

/// Zero-height chart annotation pinned to the time axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisMarker {
    pub timestamp_ms: i64,
    pub label: String,
}

/// Per-portfolio transaction value series plus buy/sell annotations. Buys
/// and sells stay in separate sequences so presentation layers can style
/// them independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTimeline {
    pub series: Vec<ChartSeries>,
    pub buy_markers: Vec<AxisMarker>,
    pub sell_markers: Vec<AxisMarker>,
}
