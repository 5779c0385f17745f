//! File-backed backtest dataset.
//!
//! One JSON document carries every precomputed cumulative-return series and
//! performance-statistics table, keyed by portfolio or benchmark id. The
//! dataset is loaded once at startup and shared read-only.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use smartfolio_core::backtest::{BacktestDataTrait, ProviderError, ReturnSeries, StatsTable};
use smartfolio_core::Result;

use crate::errors::DatasetError;

/// Precomputed backtest results for a set of portfolios and benchmarks.
///
/// Benchmark entries are stored under their decorated buy-and-hold ids
/// (`bah_<id>_bah`), matching what the catalog's `benchmark_ids()` resolves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestDataset {
    /// Cumulative-return series keyed by id.
    #[serde(default)]
    series: HashMap<String, ReturnSeries>,
    /// Performance-statistics tables keyed by id.
    #[serde(default)]
    stats: HashMap<String, StatsTable>,
}

impl BacktestDataset {
    /// Builds a dataset from already-loaded parts, restoring the ascending
    /// timestamp order each series must hold.
    pub fn new(series: HashMap<String, ReturnSeries>, stats: HashMap<String, StatsTable>) -> Self {
        let series = series
            .into_iter()
            .map(|(id, data)| (id, ReturnSeries::new(data.points)))
            .collect();
        Self { series, stats }
    }

    /// Loads a dataset from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> std::result::Result<Self, DatasetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::NotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded backtest dataset from {}: {} series, {} stats tables",
            path.display(),
            dataset.series.len(),
            dataset.stats.len()
        );
        Ok(dataset)
    }

    /// Decodes a dataset from any JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, DatasetError> {
        let raw: BacktestDataset = serde_json::from_reader(reader)?;
        // Deserialization bypasses ReturnSeries::new, so re-sort here.
        Ok(Self::new(raw.series, raw.stats))
    }

    /// Ids with a return series, sorted for stable iteration.
    pub fn series_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.series.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn has_series(&self, portfolio_id: &str) -> bool {
        self.series.contains_key(portfolio_id)
    }
}

impl BacktestDataTrait for BacktestDataset {
    fn return_series(&self, portfolio_id: &str) -> Result<ReturnSeries> {
        self.series
            .get(portfolio_id)
            .cloned()
            .ok_or_else(|| ProviderError::MissingSeries(portfolio_id.to_string()).into())
    }

    fn stats_table(&self, portfolio_id: &str) -> Result<StatsTable> {
        self.stats
            .get(portfolio_id)
            .cloned()
            .ok_or_else(|| ProviderError::MissingStats(portfolio_id.to_string()).into())
    }
}
