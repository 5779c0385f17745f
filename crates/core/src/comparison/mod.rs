//! Comparison module - portfolio vs benchmark statistics tables and charts.

mod comparison_errors;
mod comparison_model;
mod comparison_service;


// Re-export the public interface
pub use comparison_errors::ReportError;
pub use comparison_model::{
    ComparisonReport, ComparisonRow, ComparisonTable, EntityBlock, StatCell, Valence,
};
pub use comparison_service::{ComparisonService, ComparisonServiceTrait, CLASSIFIED_STAT_ROWS};
