//! Comparison report models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::valuation::ChartSeries;

/// Sign classification of a formatted statistic cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Valence {
    Pos,
    Neg,
}

/// One table cell: the preformatted backtest value plus an optional sign
/// classification. Only rows named in `CLASSIFIED_STAT_ROWS` carry one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatCell {
    /// Cell text exactly as the backtest formatted it; `None` when the
    /// entity has no value for this row.
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<Valence>,
}

/// Header block for one table entity (the portfolio or one benchmark); its
/// window labels are exactly the columns that entity contributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityBlock {
    pub portfolio_id: String,
    pub name: String,
    pub windows: Vec<String>,
}

/// One aligned statistic row; cells run block by block in header order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub label: String,
    pub cells: Vec<StatCell>,
}

/// Column-aligned join of the portfolio's statistics with its benchmarks'.
///
/// Entities keep their own window columns side by side; rows are the ordered
/// union of every entity's row labels, with empty cells where an entity has
/// no figure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    pub blocks: Vec<EntityBlock>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Total number of cell columns across all blocks.
    pub fn column_count(&self) -> usize {
        self.blocks.iter().map(|block| block.windows.len()).sum()
    }
}

/// Full comparison report for one portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub portfolio_id: String,
    pub name: String,
    /// First and last dates of the portfolio's backtest series.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub table: ComparisonTable,
    pub chart: Vec<ChartSeries>,
}
