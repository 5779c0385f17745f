//! Catalog loading and lookup.
//!
//! The catalog ships as a CSV sheet exported from the research pipeline; one
//! row per model portfolio, instrument lists as comma-separated cells.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::ReaderBuilder;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::catalog_errors::CatalogError;
use super::catalog_model::PortfolioDefinition;
use crate::errors::Result;

/// Raw CSV row. Field names mirror the exported sheet headers.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    asset_type: String,
    /// Comma-separated instrument symbols.
    stocks: String,
    criteria: String,
    model: String,
    #[serde(default)]
    benchmark: String,
    #[serde(rename = "annual_99%-var", default, deserialize_with = "decimal_cell")]
    annual_var_99: Decimal,
}

/// Decodes a numeric sheet cell tolerantly: blank cells become zero.
fn decimal_cell<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let trimmed = raw.unwrap_or_default();
    let trimmed = trimmed.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(trimmed).map_err(serde::de::Error::custom)
}

impl From<CatalogRow> for PortfolioDefinition {
    fn from(row: CatalogRow) -> Self {
        let instruments = row
            .stocks
            .split(',')
            .map(str::trim)
            .filter(|symbol| !symbol.is_empty())
            .map(str::to_string)
            .collect();

        PortfolioDefinition {
            id: row.id.trim().to_string(),
            name: row.name.trim().to_string(),
            asset_type: row.asset_type.trim().to_string(),
            instruments,
            criteria: row.criteria.trim().to_string(),
            model: row.model.trim().to_string(),
            benchmark: row.benchmark.trim().to_string(),
            annual_var_99: row.annual_var_99,
        }
    }
}

/// Immutable, id-keyed collection of portfolio definitions.
#[derive(Debug)]
pub struct PortfolioCatalog {
    portfolios: HashMap<String, PortfolioDefinition>,
    /// Ids in declaration order, for stable listings.
    order: Vec<String>,
}

impl PortfolioCatalog {
    pub fn new(definitions: Vec<PortfolioDefinition>) -> Result<Self> {
        let mut portfolios = HashMap::with_capacity(definitions.len());
        let mut order = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let id = definition.id.clone();
            if portfolios.insert(id.clone(), definition).is_some() {
                return Err(CatalogError::DuplicateId(id).into());
            }
            order.push(id);
        }

        Ok(Self { portfolios, order })
    }

    /// Loads the catalog from a CSV file on disk.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CatalogError::Read(format!("failed to open {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_reader(file)?;
        debug!(
            "Loaded {} portfolio definitions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Loads the catalog from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut definitions = Vec::new();
        for (index, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = row.map_err(|e| CatalogError::BadRow {
                row: index + 1,
                message: e.to_string(),
            })?;
            definitions.push(PortfolioDefinition::from(row));
        }

        Self::new(definitions)
    }

    pub fn get(&self, portfolio_id: &str) -> Option<&PortfolioDefinition> {
        self.portfolios.get(portfolio_id)
    }

    /// Looks up a definition, failing with `UnknownPortfolio` when absent.
    pub fn get_by_id(&self, portfolio_id: &str) -> Result<&PortfolioDefinition> {
        self.portfolios
            .get(portfolio_id)
            .ok_or_else(|| CatalogError::UnknownPortfolio(portfolio_id.to_string()).into())
    }

    pub fn contains(&self, portfolio_id: &str) -> bool {
        self.portfolios.contains_key(portfolio_id)
    }

    /// Definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = &PortfolioDefinition> {
        self.order.iter().filter_map(|id| self.portfolios.get(id))
    }

    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }
}
