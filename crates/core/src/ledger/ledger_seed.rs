//! Deterministic seed scripts for demo account resets.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ledger_model::{TransactionKind, TransactionRequest};

/// Demo portfolio ids referenced by the built-in script.
pub const SEED_MAX_RET_ID: &str = "saw_all_weather_max_ret";
pub const SEED_CRB_ID: &str = "crb_all_weather_crb";

/// One scripted transaction. Amounts are signed exactly as a transact call
/// would receive them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeedEntry {
    pub portfolio_id: String,
    pub amount: Decimal,
    pub timestamp: NaiveDateTime,
    pub kind: TransactionKind,
}

impl SeedEntry {
    fn new(portfolio_id: &str, amount: Decimal, timestamp: NaiveDateTime, kind: TransactionKind) -> Self {
        Self {
            portfolio_id: portfolio_id.to_string(),
            amount,
            timestamp,
            kind,
        }
    }

    pub(crate) fn to_request(&self) -> TransactionRequest {
        TransactionRequest {
            portfolio_id: self.portfolio_id.clone(),
            amount: self.amount,
            kind: self.kind,
            timestamp: Some(self.timestamp),
        }
    }
}

/// A replayable script of transactions with a fixed starting cash amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeedScript {
    pub starting_cash: Decimal,
    pub entries: Vec<SeedEntry>,
}

impl SeedScript {
    pub fn new(starting_cash: Decimal, entries: Vec<SeedEntry>) -> Self {
        Self {
            starting_cash,
            entries,
        }
    }

    /// Entries sorted by timestamp. The sort is stable, so entries sharing
    /// an instant keep their declared order. Scripts may declare entries
    /// grouped by portfolio rather than chronologically; replays must use
    /// this ordering or back-dated records would corrupt sibling marks.
    pub fn sorted_entries(&self) -> Vec<SeedEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|entry| entry.timestamp);
        entries
    }

    /// The built-in demo: a bit over two years across two model portfolios.
    /// Buys and sells on the max-return all-weather portfolio, a mid-2019
    /// entry into the CRB variant, and monthly system rebalances for both,
    /// starting from $100,000 of transferred cash.
    pub fn demo() -> Self {
        let mut entries = vec![
            SeedEntry::new(
                SEED_MAX_RET_ID,
                dec!(15000),
                at(2019, 1, 2, 9, 30),
                TransactionKind::UserBuy,
            ),
            SeedEntry::new(
                SEED_MAX_RET_ID,
                dec!(-5000),
                at(2019, 2, 18, 9, 30),
                TransactionKind::UserSell,
            ),
            SeedEntry::new(
                SEED_MAX_RET_ID,
                dec!(8000),
                at(2020, 1, 5, 9, 30),
                TransactionKind::UserBuy,
            ),
            SeedEntry::new(
                SEED_MAX_RET_ID,
                dec!(-4000),
                at(2020, 2, 10, 9, 30),
                TransactionKind::UserSell,
            ),
            SeedEntry::new(
                SEED_CRB_ID,
                dec!(5000),
                at(2019, 6, 2, 9, 30),
                TransactionKind::UserBuy,
            ),
        ];

        // Monthly rebalances; the CRB portfolio rebalances a minute later
        // than the max-return one, and mid-month in 2020.
        for month in 2..=12 {
            entries.push(SeedEntry::new(
                SEED_MAX_RET_ID,
                Decimal::ZERO,
                at(2019, month, 1, 16, 0),
                TransactionKind::SystemRebalance,
            ));
        }
        for month in 1..=3 {
            entries.push(SeedEntry::new(
                SEED_MAX_RET_ID,
                Decimal::ZERO,
                at(2020, month, 1, 16, 0),
                TransactionKind::SystemRebalance,
            ));
        }
        for month in 7..=12 {
            entries.push(SeedEntry::new(
                SEED_CRB_ID,
                Decimal::ZERO,
                at(2019, month, 1, 16, 1),
                TransactionKind::SystemRebalance,
            ));
        }
        for month in 1..=3 {
            entries.push(SeedEntry::new(
                SEED_CRB_ID,
                Decimal::ZERO,
                at(2020, month, 15, 16, 1),
                TransactionKind::SystemRebalance,
            ));
        }

        Self::new(dec!(100000), entries)
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    // Scripts use fixed, known-valid dates.
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}
