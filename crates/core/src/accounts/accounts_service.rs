//! Account aggregation: summaries and transaction timelines.

use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::accounts_model::{
    AccountState, AccountSummary, AxisMarker, HoldingSummary, TransactionTimeline,
};
use super::accounts_traits::{AccountServiceTrait, AccountStoreTrait};
use crate::catalog::PortfolioCatalog;
use crate::constants::{
    BUY_MARKER_LABEL, DISPLAY_DECIMAL_PRECISION, MIN_DISPLAY_VAR_PCT, SELL_MARKER_LABEL,
};
use crate::errors::Result;
use crate::ledger::TransactionKind;
use crate::valuation::{ChartPoint, ChartSeries, ValuationServiceTrait};

/// Rolls per-portfolio ledgers up into account-level views.
pub struct AccountService {
    catalog: Arc<PortfolioCatalog>,
    valuation: Arc<dyn ValuationServiceTrait>,
    store: Arc<dyn AccountStoreTrait>,
}

impl AccountService {
    pub fn new(
        catalog: Arc<PortfolioCatalog>,
        valuation: Arc<dyn ValuationServiceTrait>,
        store: Arc<dyn AccountStoreTrait>,
    ) -> Self {
        Self {
            catalog,
            valuation,
            store,
        }
    }

    /// Display VaR magnitude: `max(5, -annual_var)`. A positive annual VaR
    /// is a data anomaly; the floor keeps the displayed risk sane either way.
    fn display_var(annual_var_99: Decimal) -> Decimal {
        (-annual_var_99).max(MIN_DISPLAY_VAR_PCT)
    }
}

impl AccountServiceTrait for AccountService {
    fn summarize(&self, account: &mut AccountState) -> Result<AccountSummary> {
        let mut holdings = Vec::with_capacity(account.holdings.len());
        let mut gross_asset_value = Decimal::ZERO;

        for (portfolio_id, holding) in account.holdings.iter() {
            let definition = self.catalog.get_by_id(portfolio_id)?;
            let current_value = self.valuation.current_value(&holding.transactions, None)?;
            gross_asset_value += current_value;

            let risk_pct = Self::display_var(definition.annual_var_99);
            let risk_summary = format!(
                "The portfolio has a 99% probability of not losing more than {}% in a year.",
                risk_pct.round_dp(DISPLAY_DECIMAL_PRECISION)
            );

            holdings.push(HoldingSummary {
                portfolio_id: portfolio_id.clone(),
                name: definition.name.clone(),
                asset_type: definition.asset_type.clone(),
                total_invested: holding.total_invested,
                current_value,
                earnings: current_value - holding.total_invested,
                risk_pct,
                risk_summary,
            });
        }

        account.gross_asset_value = gross_asset_value;
        self.store.save(account)?;

        let account_total = account.gross_asset_value + account.available_cash;
        let earnings_total = account_total - account.asset_transfers;
        debug!(
            "Summarized account '{}': {} holdings, total {}, earnings {}",
            account.user_id,
            holdings.len(),
            account_total,
            earnings_total
        );

        Ok(AccountSummary {
            user_id: account.user_id.clone(),
            account_total,
            earnings_total,
            gross_asset_value: account.gross_asset_value,
            available_cash: account.available_cash,
            asset_transfers: account.asset_transfers,
            holdings,
        })
    }

    fn transaction_timeline(&self, account: &AccountState) -> Result<TransactionTimeline> {
        let mut timeline = TransactionTimeline::default();

        for (portfolio_id, holding) in account.holdings.iter() {
            let definition = self.catalog.get_by_id(portfolio_id)?;
            let mut data = Vec::with_capacity(holding.transactions.len());

            for record in &holding.transactions {
                let timestamp_ms = record.timestamp.timestamp_millis();
                data.push(ChartPoint(timestamp_ms, record.value_at_date));

                match record.kind {
                    TransactionKind::UserBuy => timeline.buy_markers.push(AxisMarker {
                        timestamp_ms,
                        label: BUY_MARKER_LABEL.to_string(),
                    }),
                    TransactionKind::UserSell => timeline.sell_markers.push(AxisMarker {
                        timestamp_ms,
                        label: SELL_MARKER_LABEL.to_string(),
                    }),
                    _ => {}
                }
            }

            timeline.series.push(ChartSeries {
                name: definition.name.clone(),
                data,
                visible: Some(true),
            });
        }

        Ok(timeline)
    }
}
