//! Portfolio catalog - immutable reference data describing the model
//! portfolios a user can transact against.

mod catalog_errors;
mod catalog_model;
mod catalog_service;


// Re-export the public interface
pub use catalog_errors::CatalogError;
pub use catalog_model::PortfolioDefinition;
pub use catalog_service::PortfolioCatalog;
