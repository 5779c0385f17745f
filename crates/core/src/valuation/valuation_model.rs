//! Chart-facing valuation models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `[epoch-milliseconds, value]` chart pair.
///
/// Serializes as a two-element array, the shape charting front ends consume
/// without reshaping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint(pub i64, pub Decimal);

impl ChartPoint {
    pub fn timestamp_ms(&self) -> i64 {
        self.0
    }

    pub fn value(&self) -> Decimal {
        self.1
    }
}

/// One named chart series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<ChartPoint>,
    /// Explicit initial visibility; `None` leaves it to the chart defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}
