//! Wire models shared with pricing and backtest-data providers.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One (instrument, weight) pair of a portfolio allocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentAllocation {
    pub symbol: String,
    /// Weight as a fraction of portfolio asset value.
    pub weight: Decimal,
}

impl InstrumentAllocation {
    pub fn new(symbol: impl Into<String>, weight: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            weight,
        }
    }
}

/// Result of pricing one prospective transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCalculation {
    /// Post-transaction instrument allocation.
    pub allocation: Vec<InstrumentAllocation>,
    /// Cash actually moved. May differ from the requested amount, e.g. a
    /// sell capped at the position value.
    pub invested_amount: Decimal,
    /// Portfolio value immediately after the transaction.
    pub asset_value: Decimal,
}

/// One observation of a precomputed cumulative-return series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPoint {
    pub timestamp: DateTime<Utc>,
    /// Cumulative return since series start, as a raw fraction (0.25 = +25%).
    pub cumulative_return: Decimal,
}

/// Time-ordered cumulative-return series for one portfolio or benchmark.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSeries {
    /// Observations in ascending timestamp order.
    pub points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn new(mut points: Vec<ReturnPoint>) -> Self {
        points.sort_by_key(|point| point.timestamp);
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Latest observation at or before `instant`, if any.
    pub fn level_at(&self, instant: DateTime<Utc>) -> Option<&ReturnPoint> {
        let upto = self
            .points
            .partition_point(|point| point.timestamp <= instant);
        if upto == 0 {
            None
        } else {
            Some(&self.points[upto - 1])
        }
    }

    /// First and last observation dates, for report headers.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                Some((first.timestamp.date_naive(), last.timestamp.date_naive()))
            }
            _ => None,
        }
    }
}

/// One labelled row of a performance-statistics table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsRow {
    /// Row label, e.g. "Annual return" or "Sharpe ratio".
    pub label: String,
    /// One preformatted cell per window, aligned with `StatsTable::windows`.
    pub values: Vec<String>,
}

/// Performance-statistics table for one portfolio: window columns by
/// labelled rows. Cells stay exactly as the backtest formatted them,
/// usually percentage strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsTable {
    /// Column headers, e.g. "Backtest" or "1Y".
    pub windows: Vec<String>,
    pub rows: Vec<StatsRow>,
}

impl StatsTable {
    pub fn row(&self, label: &str) -> Option<&StatsRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}
