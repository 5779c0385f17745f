//! Reference pricing provider driven by precomputed return series.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use smartfolio_core::backtest::{
    BacktestDataTrait, InstrumentAllocation, PortfolioCalculation, PricingProviderTrait,
    ProviderError, ReturnSeries,
};
use smartfolio_core::catalog::PortfolioDefinition;
use smartfolio_core::ledger::TransactionRecord;
use smartfolio_core::Result;

/// Prices transactions by replaying cash movements along a portfolio's
/// cumulative-return series.
///
/// Cash moved at `t` is worth `amount * (1 + level(as_of)) / (1 + level(t))`
/// at the valuation instant, so a sell (negative movement) keeps its
/// proportional share withdrawn at every later instant. Instants outside the
/// series range clamp to its endpoints. No security-level math happens here;
/// the series already encodes it.
pub struct SeriesPricingProvider {
    dataset: Arc<dyn BacktestDataTrait>,
}

impl SeriesPricingProvider {
    pub fn new(dataset: Arc<dyn BacktestDataTrait>) -> Self {
        Self { dataset }
    }
}

impl PricingProviderTrait for SeriesPricingProvider {
    fn calculate_portfolio(
        &self,
        amount: Decimal,
        prior_transactions: &[TransactionRecord],
        definition: &PortfolioDefinition,
        at_time: DateTime<Utc>,
    ) -> Result<PortfolioCalculation> {
        let series = self.dataset.return_series(&definition.id)?;
        let current_value = replay_value(&series, &definition.id, prior_transactions, at_time)?;

        // A sell never withdraws more than the position is worth.
        let invested_amount = if amount < Decimal::ZERO {
            let sellable = current_value.max(Decimal::ZERO);
            amount.max(-sellable)
        } else {
            amount
        };
        let asset_value = current_value + invested_amount;

        debug!(
            "Priced {} against '{}' at {}: invested {}, asset value {}",
            amount, definition.id, at_time, invested_amount, asset_value
        );

        Ok(PortfolioCalculation {
            allocation: equal_weight_allocation(&definition.instruments),
            invested_amount,
            asset_value,
        })
    }

    fn calculate_current_value(
        &self,
        transactions: &[TransactionRecord],
        as_of: Option<DateTime<Utc>>,
    ) -> Result<Decimal> {
        let first = match transactions.first() {
            Some(record) => record,
            None => return Ok(Decimal::ZERO),
        };
        let series = self.dataset.return_series(&first.portfolio_id)?;
        let as_of = as_of.unwrap_or_else(Utc::now);
        replay_value(&series, &first.portfolio_id, transactions, as_of)
    }
}

/// Values an ordered history at `as_of` by growing each cash movement from
/// its event instant. Marks and rebalances carry zero cash and drop out;
/// records after `as_of` have not happened yet.
fn replay_value(
    series: &ReturnSeries,
    portfolio_id: &str,
    transactions: &[TransactionRecord],
    as_of: DateTime<Utc>,
) -> Result<Decimal> {
    let end_level = growth_level(series, portfolio_id, as_of)?;
    let mut value = Decimal::ZERO;
    for record in transactions {
        if record.amount.is_zero() || record.timestamp > as_of {
            continue;
        }
        let entry_level = growth_level(series, portfolio_id, record.timestamp)?;
        value += record.amount * end_level / entry_level;
    }
    Ok(value)
}

/// Growth level `1 + cumulative_return` at `instant`. Instants before the
/// first observation clamp to series start; `level_at` already clamps the
/// far end to the last observation.
fn growth_level(
    series: &ReturnSeries,
    portfolio_id: &str,
    instant: DateTime<Utc>,
) -> Result<Decimal> {
    let point = series
        .level_at(instant)
        .or_else(|| series.points.first())
        .ok_or_else(|| ProviderError::EmptySeries(portfolio_id.to_string()))?;
    let level = Decimal::ONE + point.cumulative_return;
    if level <= Decimal::ZERO {
        return Err(ProviderError::Calculation(format!(
            "non-positive growth level for '{}' at {}",
            portfolio_id, instant
        ))
        .into());
    }
    Ok(level)
}

fn equal_weight_allocation(instruments: &[String]) -> Vec<InstrumentAllocation> {
    if instruments.is_empty() {
        return Vec::new();
    }
    let weight = Decimal::ONE / Decimal::from(instruments.len() as u64);
    instruments
        .iter()
        .map(|symbol| InstrumentAllocation::new(symbol.clone(), weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use smartfolio_core::backtest::ReturnPoint;
    use smartfolio_core::ledger::TransactionKind;
    use smartfolio_core::Error;

    use crate::dataset::BacktestDataset;

    fn instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 16, 30, 0).unwrap()
    }

    fn point(year: i32, month: u32, day: u32, level: Decimal) -> ReturnPoint {
        ReturnPoint {
            timestamp: instant(year, month, day),
            cumulative_return: level,
        }
    }

    // Levels 1.0 / 1.25 / 1.5 at the three observations.
    fn growth_series() -> ReturnSeries {
        ReturnSeries::new(vec![
            point(2019, 1, 2, dec!(0.0)),
            point(2019, 7, 1, dec!(0.25)),
            point(2020, 1, 2, dec!(0.5)),
        ])
    }

    fn provider() -> SeriesPricingProvider {
        let mut series = HashMap::new();
        series.insert("growth".to_string(), growth_series());
        series.insert(
            "bust".to_string(),
            ReturnSeries::new(vec![point(2019, 1, 2, dec!(-1.0))]),
        );
        let dataset = BacktestDataset::new(series, HashMap::new());
        SeriesPricingProvider::new(Arc::new(dataset))
    }

    fn definition(id: &str) -> PortfolioDefinition {
        PortfolioDefinition {
            id: id.to_string(),
            name: "Growth".to_string(),
            asset_type: "stocks".to_string(),
            instruments: vec!["VTI".to_string(), "GLD".to_string()],
            criteria: "all_weather".to_string(),
            model: "max_ret".to_string(),
            benchmark: String::new(),
            annual_var_99: dec!(-11.3),
        }
    }

    fn record(kind: TransactionKind, amount: Decimal, at: DateTime<Utc>) -> TransactionRecord {
        TransactionRecord::new("growth", kind, at, amount, vec![], amount)
    }

    fn buy(amount: Decimal, at: DateTime<Utc>) -> TransactionRecord {
        record(TransactionKind::UserBuy, amount, at)
    }

    #[test]
    fn test_buy_into_empty_ledger() {
        let calc = provider()
            .calculate_portfolio(dec!(10000), &[], &definition("growth"), instant(2019, 1, 2))
            .unwrap();

        assert_eq!(calc.invested_amount, dec!(10000));
        assert_eq!(calc.asset_value, dec!(10000));
        assert_eq!(
            calc.allocation,
            vec![
                InstrumentAllocation::new("VTI", dec!(0.5)),
                InstrumentAllocation::new("GLD", dec!(0.5)),
            ]
        );
    }

    #[test]
    fn test_value_grows_along_series() {
        let history = [buy(dec!(10000), instant(2019, 1, 2))];
        let value = provider()
            .calculate_current_value(&history, Some(instant(2020, 1, 2)))
            .unwrap();
        assert_eq!(value, dec!(15000));
    }

    #[test]
    fn test_sell_capped_at_position_value() {
        // 10 000 bought at level 1.0 is worth 12 500 at level 1.25.
        let history = [buy(dec!(10000), instant(2019, 1, 2))];
        let calc = provider()
            .calculate_portfolio(
                dec!(-20000),
                &history,
                &definition("growth"),
                instant(2019, 7, 1),
            )
            .unwrap();

        assert_eq!(calc.invested_amount, dec!(-12500));
        assert_eq!(calc.asset_value, dec!(0));
    }

    #[test]
    fn test_partial_sell_stays_withdrawn() {
        let history = [
            buy(dec!(10000), instant(2019, 1, 2)),
            record(TransactionKind::UserSell, dec!(-5000), instant(2019, 7, 1)),
        ];

        // 15 000 grown from the buy, minus 5 000 * 1.5 / 1.25 = 6 000.
        let value = provider()
            .calculate_current_value(&history, Some(instant(2020, 1, 2)))
            .unwrap();
        assert_eq!(value, dec!(9000));
    }

    #[test]
    fn test_zero_amount_records_drop_out() {
        let history = [
            buy(dec!(10000), instant(2019, 1, 2)),
            TransactionRecord::new(
                "growth",
                TransactionKind::SystemRebalance,
                instant(2019, 3, 1),
                Decimal::ZERO,
                vec![],
                dec!(10000),
            ),
            TransactionRecord::cross_mark("growth", instant(2019, 4, 1), dec!(10000)),
        ];
        let value = provider()
            .calculate_current_value(&history, Some(instant(2019, 7, 1)))
            .unwrap();
        assert_eq!(value, dec!(12500));
    }

    #[test]
    fn test_instants_clamp_to_series_range() {
        // Entry before the first observation prices at series start.
        let early = [buy(dec!(10000), instant(2018, 12, 1))];
        let value = provider()
            .calculate_current_value(&early, Some(instant(2019, 7, 1)))
            .unwrap();
        assert_eq!(value, dec!(12500));

        // Valuation after the last observation holds the final level.
        let held = [buy(dec!(10000), instant(2019, 1, 2))];
        let value = provider()
            .calculate_current_value(&held, Some(instant(2021, 6, 1)))
            .unwrap();
        assert_eq!(value, dec!(15000));
    }

    #[test]
    fn test_future_records_not_yet_valued() {
        let history = [buy(dec!(10000), instant(2020, 1, 2))];
        let value = provider()
            .calculate_current_value(&history, Some(instant(2019, 7, 1)))
            .unwrap();
        assert_eq!(value, Decimal::ZERO);
    }

    #[test]
    fn test_sell_from_empty_ledger_moves_nothing() {
        let calc = provider()
            .calculate_portfolio(dec!(-5000), &[], &definition("growth"), instant(2019, 7, 1))
            .unwrap();
        assert_eq!(calc.invested_amount, Decimal::ZERO);
        assert_eq!(calc.asset_value, Decimal::ZERO);
    }

    #[test]
    fn test_empty_history_is_zero() {
        let value = provider().calculate_current_value(&[], None).unwrap();
        assert_eq!(value, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_portfolio_errors() {
        let err = provider()
            .calculate_portfolio(dec!(1000), &[], &definition("mystery"), instant(2019, 1, 2))
            .unwrap_err();
        match err {
            Error::Provider(ProviderError::MissingSeries(id)) => assert_eq!(id, "mystery"),
            other => panic!("expected missing series, got {:?}", other),
        }
    }

    #[test]
    fn test_total_loss_level_rejected() {
        let err = provider()
            .calculate_portfolio(dec!(1000), &[], &definition("bust"), instant(2019, 1, 2))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Provider(ProviderError::Calculation(_))
        ));
    }
}
