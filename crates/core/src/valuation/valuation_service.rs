//! Valuation service: point-in-time values and historical return charts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::valuation_model::{ChartPoint, ChartSeries};
use crate::backtest::{BacktestDataTrait, PricingProviderTrait, ReturnSeries};
use crate::catalog::PortfolioCatalog;
use crate::errors::Result;
use crate::ledger::TransactionRecord;

const PERCENT: Decimal = dec!(100);

/// Contract for the valuation engine.
pub trait ValuationServiceTrait: Send + Sync {
    /// Values a chronological transaction history at `as_of` (now when
    /// `None`), considering only records dated at or before that instant.
    /// Pure: nothing is mutated and identical inputs yield identical output.
    fn current_value(
        &self,
        transactions: &[TransactionRecord],
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Decimal>;

    /// Historical cumulative-return chart for a portfolio and the given
    /// benchmarks, as `(epoch-ms, percent)` pairs. The portfolio series
    /// comes first and is explicitly visible; benchmarks follow in caller
    /// order with visibility left to the chart.
    fn historical_series(
        &self,
        portfolio_id: &str,
        benchmark_ids: &[String],
    ) -> Result<Vec<ChartSeries>>;
}

pub struct ValuationService {
    catalog: Arc<PortfolioCatalog>,
    provider: Arc<dyn PricingProviderTrait>,
    backtest_data: Arc<dyn BacktestDataTrait>,
}

impl ValuationService {
    pub fn new(
        catalog: Arc<PortfolioCatalog>,
        provider: Arc<dyn PricingProviderTrait>,
        backtest_data: Arc<dyn BacktestDataTrait>,
    ) -> Self {
        Self {
            catalog,
            provider,
            backtest_data,
        }
    }

    /// Raw cumulative-return fractions become percent on the chart axis.
    fn chart_points(series: &ReturnSeries) -> Vec<ChartPoint> {
        series
            .points
            .iter()
            .map(|point| {
                ChartPoint(
                    point.timestamp.timestamp_millis(),
                    point.cumulative_return * PERCENT,
                )
            })
            .collect()
    }
}

impl ValuationServiceTrait for ValuationService {
    fn current_value(
        &self,
        transactions: &[TransactionRecord],
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Decimal> {
        let cutoff = as_of.unwrap_or_else(Utc::now);
        let upto = transactions.partition_point(|record| record.timestamp <= cutoff);
        let history = &transactions[..upto];
        if history.is_empty() {
            return Ok(Decimal::ZERO);
        }
        self.provider.calculate_current_value(history, Some(cutoff))
    }

    fn historical_series(
        &self,
        portfolio_id: &str,
        benchmark_ids: &[String],
    ) -> Result<Vec<ChartSeries>> {
        let definition = self.catalog.get_by_id(portfolio_id)?;
        let own_series = self.backtest_data.return_series(portfolio_id)?;

        let mut series = Vec::with_capacity(benchmark_ids.len() + 1);
        series.push(ChartSeries {
            name: definition.name.clone(),
            data: Self::chart_points(&own_series),
            visible: Some(true),
        });

        for benchmark_id in benchmark_ids {
            let benchmark = self.catalog.get_by_id(benchmark_id)?;
            let benchmark_series = self.backtest_data.return_series(benchmark_id)?;
            series.push(ChartSeries {
                name: benchmark.name.clone(),
                data: Self::chart_points(&benchmark_series),
                visible: None,
            });
        }

        debug!(
            "Built historical chart for '{}' with {} benchmark(s)",
            portfolio_id,
            benchmark_ids.len()
        );
        Ok(series)
    }
}
