//! Valuation module - point-in-time values and historical chart series.

mod valuation_model;
mod valuation_service;


// Re-export the public interface
pub use valuation_model::{ChartPoint, ChartSeries};
pub use valuation_service::{ValuationService, ValuationServiceTrait};
