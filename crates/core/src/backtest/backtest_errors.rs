//! Provider error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The dataset has no cumulative-return series under this id.
    #[error("no backtest series for portfolio '{0}'")]
    MissingSeries(String),

    /// The dataset has no statistics table under this id.
    #[error("no performance statistics for portfolio '{0}'")]
    MissingStats(String),

    /// The series exists but holds no observations.
    #[error("backtest series for portfolio '{0}' is empty")]
    EmptySeries(String),

    /// The provider could not price the request.
    #[error("pricing calculation failed: {0}")]
    Calculation(String),
}
