//! Ledger service: validated, atomically recorded transactions.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::ledger_errors::LedgerError;
use super::ledger_model::{
    TransactionReceipt, TransactionRecord, TransactionRequest,
};
use super::ledger_seed::SeedScript;
use crate::accounts::{AccountState, AccountStoreTrait};
use crate::backtest::{PortfolioCalculation, PricingProviderTrait};
use crate::catalog::PortfolioCatalog;
use crate::constants::DEFAULT_TRANSACTION_TZ;
use crate::errors::Result;
use crate::utils::time_utils;
use crate::valuation::ValuationServiceTrait;

/// Contract for the transaction ledger.
pub trait LedgerServiceTrait: Send + Sync {
    /// Records one transaction and marks every sibling holding at the same
    /// instant. The in-memory account either absorbs the whole side-effect
    /// sequence or none of it: validation and every provider call complete
    /// before the first mutation.
    fn transact(
        &self,
        account: &mut AccountState,
        request: TransactionRequest,
    ) -> Result<TransactionReceipt>;

    /// Records a user buy of `amount` cash.
    fn buy(
        &self,
        account: &mut AccountState,
        portfolio_id: &str,
        amount: Decimal,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<TransactionReceipt>;

    /// Records a user sell returning up to `amount` cash.
    fn sell(
        &self,
        account: &mut AccountState,
        portfolio_id: &str,
        amount: Decimal,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<TransactionReceipt>;

    /// Records a zero-cash system rebalance.
    fn rebalance(
        &self,
        account: &mut AccountState,
        portfolio_id: &str,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<TransactionReceipt>;

    /// Clears the account back to zero; with a script, refunds the scripted
    /// starting cash and replays every entry chronologically.
    fn reset(&self, account: &mut AccountState, seed: Option<&SeedScript>) -> Result<()>;
}

/// Records transactions against per-portfolio ledgers sharing one cash pool.
pub struct LedgerService {
    catalog: Arc<PortfolioCatalog>,
    provider: Arc<dyn PricingProviderTrait>,
    valuation: Arc<dyn ValuationServiceTrait>,
    store: Arc<dyn AccountStoreTrait>,
    /// Timezone used to interpret naive request timestamps.
    timezone: Tz,
}

impl LedgerService {
    pub fn new(
        catalog: Arc<PortfolioCatalog>,
        provider: Arc<dyn PricingProviderTrait>,
        valuation: Arc<dyn ValuationServiceTrait>,
        store: Arc<dyn AccountStoreTrait>,
    ) -> Self {
        Self {
            catalog,
            provider,
            valuation,
            store,
            timezone: DEFAULT_TRANSACTION_TZ,
        }
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    fn resolve_timestamp(&self, request: &TransactionRequest) -> Result<DateTime<Utc>> {
        match request.timestamp {
            Some(naive) => {
                time_utils::localize(naive, self.timezone).map(time_utils::truncate_to_minute)
            }
            None => Ok(time_utils::truncate_to_minute(Utc::now())),
        }
    }
}

impl LedgerServiceTrait for LedgerService {
    fn transact(
        &self,
        account: &mut AccountState,
        request: TransactionRequest,
    ) -> Result<TransactionReceipt> {
        if request.kind.is_mark() {
            return Err(LedgerError::ReservedKind(request.kind).into());
        }

        let definition = self.catalog.get_by_id(&request.portfolio_id)?;
        let timestamp = self.resolve_timestamp(&request)?;

        // Affordability applies to the signed request regardless of kind;
        // withdrawals are negative and always pass.
        if request.amount > account.available_cash {
            warn!(
                "Rejected {} of {} into '{}' for account '{}': only {} available",
                request.kind,
                request.amount,
                request.portfolio_id,
                account.user_id,
                account.available_cash
            );
            return Err(LedgerError::InsufficientFunds {
                requested: request.amount,
                available: account.available_cash,
            }
            .into());
        }

        // Price against the pre-transaction history of the target ledger.
        let prior = account
            .holding(&request.portfolio_id)
            .map(|holding| holding.transactions.as_slice())
            .unwrap_or(&[]);
        let calculation =
            self.provider
                .calculate_portfolio(request.amount, prior, definition, timestamp)?;

        // Value every sibling at the same instant before mutating anything,
        // so a provider failure cannot leave a half-written broadcast.
        let mut sibling_marks = Vec::new();
        for (sibling_id, holding) in account.holdings.iter() {
            if sibling_id == &request.portfolio_id {
                continue;
            }
            let value = self
                .valuation
                .current_value(&holding.transactions, Some(timestamp))?;
            sibling_marks.push(TransactionRecord::cross_mark(
                sibling_id.clone(),
                timestamp,
                value,
            ));
        }

        let PortfolioCalculation {
            allocation,
            invested_amount,
            asset_value,
        } = calculation;

        // Mutation starts here; everything below is infallible in memory.
        for mark in sibling_marks {
            if let Some(holding) = account.holdings.get_mut(&mark.portfolio_id) {
                holding.push_mark(mark);
            }
        }

        let record = TransactionRecord::new(
            request.portfolio_id.clone(),
            request.kind,
            timestamp,
            invested_amount,
            allocation,
            asset_value,
        );
        let record_id = record.id.clone();

        let holding = account.holding_mut(&request.portfolio_id);
        holding.push_ordered(record);
        holding.total_invested += invested_amount;
        account.available_cash -= invested_amount;

        debug!(
            "Recorded {} into '{}' for account '{}' at {}: invested {} of requested {}",
            request.kind,
            request.portfolio_id,
            account.user_id,
            timestamp,
            invested_amount,
            request.amount
        );

        self.store.save(account)?;

        Ok(TransactionReceipt {
            record_id,
            portfolio_id: request.portfolio_id,
            kind: request.kind,
            timestamp,
            requested_amount: request.amount,
            invested_amount,
            cash_delta: -invested_amount,
            value_at_date: asset_value,
        })
    }

    fn buy(
        &self,
        account: &mut AccountState,
        portfolio_id: &str,
        amount: Decimal,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<TransactionReceipt> {
        self.transact(account, TransactionRequest::buy(portfolio_id, amount, timestamp))
    }

    fn sell(
        &self,
        account: &mut AccountState,
        portfolio_id: &str,
        amount: Decimal,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<TransactionReceipt> {
        self.transact(
            account,
            TransactionRequest::sell(portfolio_id, amount, timestamp),
        )
    }

    fn rebalance(
        &self,
        account: &mut AccountState,
        portfolio_id: &str,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<TransactionReceipt> {
        self.transact(
            account,
            TransactionRequest::rebalance(portfolio_id, timestamp),
        )
    }

    fn reset(&self, account: &mut AccountState, seed: Option<&SeedScript>) -> Result<()> {
        account.clear();

        match seed {
            None => {
                debug!("Reset account '{}' to an empty state", account.user_id);
            }
            Some(script) => {
                account.available_cash = script.starting_cash;
                account.asset_transfers = script.starting_cash;
                for entry in script.sorted_entries() {
                    self.transact(account, entry.to_request())?;
                }
                debug!(
                    "Reseeded account '{}' with {} scripted transactions",
                    account.user_id,
                    script.entries.len()
                );
            }
        }

        self.store.save(account)
    }
}
