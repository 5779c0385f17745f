//! Comparison service: joins portfolio and benchmark statistics.

use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::comparison_errors::ReportError;
use super::comparison_model::{
    ComparisonReport, ComparisonRow, ComparisonTable, EntityBlock, StatCell, Valence,
};
use crate::backtest::{BacktestDataTrait, StatsTable};
use crate::catalog::PortfolioCatalog;
use crate::errors::Result;
use crate::valuation::ValuationServiceTrait;

/// Stat rows whose cells get a pos/neg classification in the joined table.
pub const CLASSIFIED_STAT_ROWS: [&str; 3] =
    ["Annual return", "Cumulative returns", "Sharpe ratio"];

/// Contract for the comparison reporter.
pub trait ComparisonServiceTrait: Send + Sync {
    /// Joins the portfolio's statistics table and chart series with the
    /// given benchmarks, each entity keeping its own columns.
    fn compare(&self, portfolio_id: &str, benchmark_ids: &[String]) -> Result<ComparisonReport>;

    /// `compare` against the benchmarks declared in the catalog row.
    fn compare_declared(&self, portfolio_id: &str) -> Result<ComparisonReport>;
}

pub struct ComparisonService {
    catalog: Arc<PortfolioCatalog>,
    backtest_data: Arc<dyn BacktestDataTrait>,
    valuation: Arc<dyn ValuationServiceTrait>,
}

impl ComparisonService {
    pub fn new(
        catalog: Arc<PortfolioCatalog>,
        backtest_data: Arc<dyn BacktestDataTrait>,
        valuation: Arc<dyn ValuationServiceTrait>,
    ) -> Self {
        Self {
            catalog,
            backtest_data,
            valuation,
        }
    }

    /// Reads a formatted statistic cell back as a number: strips a trailing
    /// percent sign and thousands separators. "12.34%", "-0.5" and
    /// "1,234.56%" all parse; "n/a" does not.
    fn parse_stat_cell(row: &str, raw: &str) -> Result<Decimal> {
        let cleaned = raw.trim().trim_end_matches('%').replace(',', "");
        Decimal::from_str(cleaned.trim()).map_err(|_| {
            ReportError::MalformedStatCell {
                row: row.to_string(),
                value: raw.to_string(),
            }
            .into()
        })
    }

    fn is_classified_row(label: &str) -> bool {
        CLASSIFIED_STAT_ROWS.contains(&label)
    }

    fn build_table(entities: &[(String, String, StatsTable)]) -> Result<ComparisonTable> {
        // Ordered union of row labels: the first entity's order wins, later
        // tables append the labels it did not have.
        let mut labels: Vec<String> = Vec::new();
        for (_, _, table) in entities {
            for row in &table.rows {
                if !labels.iter().any(|label| label == &row.label) {
                    labels.push(row.label.clone());
                }
            }
        }

        let blocks = entities
            .iter()
            .map(|(portfolio_id, name, table)| EntityBlock {
                portfolio_id: portfolio_id.clone(),
                name: name.clone(),
                windows: table.windows.clone(),
            })
            .collect();

        let mut rows = Vec::with_capacity(labels.len());
        for label in &labels {
            let classified = Self::is_classified_row(label);
            let mut cells = Vec::new();

            for (_, _, table) in entities {
                let stat_row = table.row(label);
                for column in 0..table.windows.len() {
                    let value = stat_row.and_then(|row| row.values.get(column).cloned());
                    let valence = match &value {
                        Some(raw) if classified && !raw.trim().is_empty() => {
                            let figure = Self::parse_stat_cell(label, raw)?;
                            if figure > Decimal::ZERO {
                                Some(Valence::Pos)
                            } else {
                                Some(Valence::Neg)
                            }
                        }
                        _ => None,
                    };
                    cells.push(StatCell { value, valence });
                }
            }

            rows.push(ComparisonRow {
                label: label.clone(),
                cells,
            });
        }

        Ok(ComparisonTable { blocks, rows })
    }
}

impl ComparisonServiceTrait for ComparisonService {
    fn compare(&self, portfolio_id: &str, benchmark_ids: &[String]) -> Result<ComparisonReport> {
        let definition = self.catalog.get_by_id(portfolio_id)?;

        let mut entities = Vec::with_capacity(benchmark_ids.len() + 1);
        entities.push((
            portfolio_id.to_string(),
            definition.name.clone(),
            self.backtest_data.stats_table(portfolio_id)?,
        ));
        for benchmark_id in benchmark_ids {
            let benchmark = self.catalog.get_by_id(benchmark_id)?;
            entities.push((
                benchmark_id.clone(),
                benchmark.name.clone(),
                self.backtest_data.stats_table(benchmark_id)?,
            ));
        }

        let table = Self::build_table(&entities)?;
        let chart = self.valuation.historical_series(portfolio_id, benchmark_ids)?;
        let date_range = self.backtest_data.return_series(portfolio_id)?.date_range();

        debug!(
            "Compared '{}' against {} benchmark(s): {} rows, {} columns",
            portfolio_id,
            benchmark_ids.len(),
            table.rows.len(),
            table.column_count()
        );

        Ok(ComparisonReport {
            portfolio_id: portfolio_id.to_string(),
            name: definition.name.clone(),
            date_range,
            table,
            chart,
        })
    }

    fn compare_declared(&self, portfolio_id: &str) -> Result<ComparisonReport> {
        let benchmark_ids = self.catalog.get_by_id(portfolio_id)?.benchmark_ids();
        self.compare(portfolio_id, &benchmark_ids)
    }
}
