//! Ledger domain models.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backtest::InstrumentAllocation;

/// Kind of a ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Cash invested by the user.
    UserBuy,
    /// Cash withdrawn by the user.
    UserSell,
    /// System-initiated rebalance; conventionally zero cash.
    SystemRebalance,
    /// Engine-generated sibling value snapshot; zero cash, empty allocation.
    CrossMark,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::UserBuy => "USER_BUY",
            TransactionKind::UserSell => "USER_SELL",
            TransactionKind::SystemRebalance => "SYSTEM_REBALANCE",
            TransactionKind::CrossMark => "CROSS_MARK",
        }
    }

    /// True for records created directly by a user action.
    pub fn is_user(&self) -> bool {
        matches!(self, TransactionKind::UserBuy | TransactionKind::UserSell)
    }

    /// True for engine-generated value snapshots.
    pub fn is_mark(&self) -> bool {
        matches!(self, TransactionKind::CrossMark)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable ledger record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub portfolio_id: String,
    pub kind: TransactionKind,
    /// Event instant, minute precision.
    pub timestamp: DateTime<Utc>,
    /// Cash actually moved: positive invested, negative withdrawn, zero for
    /// rebalances and marks.
    pub amount: Decimal,
    /// Instrument allocation resulting from this event; empty for marks.
    pub allocation: Vec<InstrumentAllocation>,
    /// Portfolio value as of `timestamp`, after the event.
    pub value_at_date: Decimal,
}

impl TransactionRecord {
    pub fn new(
        portfolio_id: impl Into<String>,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
        amount: Decimal,
        allocation: Vec<InstrumentAllocation>,
        value_at_date: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.into(),
            kind,
            timestamp,
            amount,
            allocation,
            value_at_date,
        }
    }

    /// Engine-generated snapshot of a sibling portfolio's value at another
    /// portfolio's event instant.
    pub fn cross_mark(
        portfolio_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        value_at_date: Decimal,
    ) -> Self {
        Self::new(
            portfolio_id,
            TransactionKind::CrossMark,
            timestamp,
            Decimal::ZERO,
            Vec::new(),
            value_at_date,
        )
    }
}

/// One held model portfolio: its transaction ledger plus the running
/// invested total.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    /// Signed running sum of cash moved by recorded transactions. Marks and
    /// rebalances carry zero, so only real buys and sells move it.
    pub total_invested: Decimal,
    /// Records in non-decreasing timestamp order.
    pub transactions: Vec<TransactionRecord>,
}

impl PortfolioHolding {
    pub fn new() -> Self {
        Self::default()
    }

    fn insertion_point(&self, timestamp: DateTime<Utc>) -> usize {
        self.transactions
            .partition_point(|record| record.timestamp <= timestamp)
    }

    /// Appends `record` preserving non-decreasing timestamp order; equal
    /// timestamps keep arrival order. Back-dated records land before any
    /// later-dated ones so valuation always replays a chronological history.
    pub fn push_ordered(&mut self, record: TransactionRecord) {
        let at = self.insertion_point(record.timestamp);
        if at == self.transactions.len() {
            self.transactions.push(record);
        } else {
            debug!(
                "Back-dated {} record for '{}' inserted at position {} of {}",
                record.kind,
                record.portfolio_id,
                at,
                self.transactions.len()
            );
            self.transactions.insert(at, record);
        }
    }

    /// Appends a cross-mark unless this ledger already holds a mark at the
    /// same instant. Returns whether the mark was recorded. Only marks are
    /// ever suppressed; real records always land.
    pub fn push_mark(&mut self, record: TransactionRecord) -> bool {
        let from = self
            .transactions
            .partition_point(|r| r.timestamp < record.timestamp);
        let upto = self.insertion_point(record.timestamp);
        if self.transactions[from..upto].iter().any(|r| r.kind.is_mark()) {
            debug!(
                "Suppressed duplicate mark for '{}' at {}",
                record.portfolio_id, record.timestamp
            );
            return false;
        }
        self.push_ordered(record);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}

/// Input for one ledger transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub portfolio_id: String,
    /// Signed requested cash amount: positive invests, negative withdraws.
    pub amount: Decimal,
    pub kind: TransactionKind,
    /// Wall-clock reading in the engine's input timezone; `None` means now.
    pub timestamp: Option<NaiveDateTime>,
}

impl TransactionRequest {
    pub fn buy(
        portfolio_id: impl Into<String>,
        amount: Decimal,
        timestamp: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            amount,
            kind: TransactionKind::UserBuy,
            timestamp,
        }
    }

    /// `amount` is the positive cash the user wants back; stored negated.
    pub fn sell(
        portfolio_id: impl Into<String>,
        amount: Decimal,
        timestamp: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            amount: -amount,
            kind: TransactionKind::UserSell,
            timestamp,
        }
    }

    pub fn rebalance(portfolio_id: impl Into<String>, timestamp: Option<NaiveDateTime>) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            amount: Decimal::ZERO,
            kind: TransactionKind::SystemRebalance,
            timestamp,
        }
    }
}

/// Outcome of a successful transact call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub record_id: String,
    pub portfolio_id: String,
    pub kind: TransactionKind,
    pub timestamp: DateTime<Utc>,
    /// Cash the caller asked to move.
    pub requested_amount: Decimal,
    /// Cash actually moved, after provider capping.
    pub invested_amount: Decimal,
    /// Net change applied to available cash (`-invested_amount`).
    pub cash_delta: Decimal,
    /// Portfolio value immediately after the transaction.
    pub value_at_date: Decimal,
}

impl TransactionReceipt {
    /// Requested cash that did not move, positive when the provider capped
    /// the request.
    pub fn unfilled_amount(&self) -> Decimal {
        (self.requested_amount - self.invested_amount).abs()
    }
}
