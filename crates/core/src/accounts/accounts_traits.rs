//! Account persistence and aggregation traits.

use super::accounts_model::{AccountState, AccountSummary, TransactionTimeline};
use crate::errors::Result;

/// Contract for the external account store.
///
/// The engine calls `save` after every mutating operation; the host decides
/// the medium. Implementations must be shareable across threads, with
/// per-account write serialization left to the caller.
pub trait AccountStoreTrait: Send + Sync {
    /// Loads the account for `user_id`, if one was ever saved.
    fn load(&self, user_id: &str) -> Result<Option<AccountState>>;

    /// Persists the full account state.
    fn save(&self, account: &AccountState) -> Result<()>;
}

/// Contract for account-level aggregation.
pub trait AccountServiceTrait: Send + Sync {
    /// Recomputes the account roll-up. Also refreshes and persists the
    /// cached gross asset value, so every summary is a small write.
    fn summarize(&self, account: &mut AccountState) -> Result<AccountSummary>;

    /// Value-over-time series for every holding, with buy/sell axis markers.
    fn transaction_timeline(&self, account: &AccountState) -> Result<TransactionTimeline>;
}
