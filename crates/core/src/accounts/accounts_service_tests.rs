#[cfg(test)]
mod tests {
    use crate::accounts::{
        AccountService, AccountServiceTrait, AccountState, AccountStoreTrait, MemoryAccountStore,
    };
    use crate::catalog::{PortfolioCatalog, PortfolioDefinition};
    use crate::errors::Result;
    use crate::ledger::{TransactionKind, TransactionRecord};
    use crate::valuation::{ChartSeries, ValuationServiceTrait};
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    // --- Mock valuation: a flat 10% growth market ---

    struct GrowthValuation;

    impl ValuationServiceTrait for GrowthValuation {
        fn current_value(
            &self,
            transactions: &[TransactionRecord],
            _as_of: Option<DateTime<Utc>>,
        ) -> Result<Decimal> {
            let net: Decimal = transactions.iter().map(|r| r.amount).sum();
            Ok(net * dec!(1.1))
        }

        fn historical_series(
            &self,
            _portfolio_id: &str,
            _benchmark_ids: &[String],
        ) -> Result<Vec<ChartSeries>> {
            Ok(Vec::new())
        }
    }

    // --- Fixtures ---

    fn definition(id: &str, name: &str, annual_var_99: Decimal) -> PortfolioDefinition {
        PortfolioDefinition {
            id: id.to_string(),
            name: name.to_string(),
            asset_type: "stocks".to_string(),
            instruments: vec!["VTI".to_string()],
            criteria: "all_weather".to_string(),
            model: "max_ret".to_string(),
            benchmark: String::new(),
            annual_var_99,
        }
    }

    fn setup() -> (AccountService, Arc<MemoryAccountStore>) {
        let catalog = Arc::new(
            PortfolioCatalog::new(vec![
                definition("alpha", "Alpha Weather", dec!(-11.3)),
                definition("beta", "Beta Commodities", dec!(-8.7)),
                definition("lowrisk", "Low Risk", dec!(-2.5)),
                definition("anomaly", "Anomaly", dec!(3)),
            ])
            .unwrap(),
        );
        let store = Arc::new(MemoryAccountStore::new());
        let service = AccountService::new(catalog, Arc::new(GrowthValuation), store.clone());
        (service, store)
    }

    fn instant(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, day, hour, 30, 0).single().unwrap()
    }

    fn record(
        portfolio_id: &str,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
        amount: Decimal,
        value: Decimal,
    ) -> TransactionRecord {
        TransactionRecord::new(portfolio_id, kind, timestamp, amount, Vec::new(), value)
    }

    fn invested_account() -> AccountState {
        let mut account = AccountState::new("u1");
        account.available_cash = dec!(81000);
        account.asset_transfers = dec!(100000);

        let alpha = account.holding_mut("alpha");
        alpha.push_ordered(record(
            "alpha",
            TransactionKind::UserBuy,
            instant(2, 16),
            dec!(15000),
            dec!(15000),
        ));
        alpha.push_ordered(record(
            "alpha",
            TransactionKind::UserSell,
            instant(18, 16),
            dec!(-1000),
            dec!(14000),
        ));
        alpha.total_invested = dec!(14000);

        let beta = account.holding_mut("beta");
        beta.push_ordered(record(
            "beta",
            TransactionKind::UserBuy,
            instant(20, 16),
            dec!(5000),
            dec!(5000),
        ));
        beta.total_invested = dec!(5000);

        account
    }

    // ==================== Summaries ====================

    #[test]
    fn test_summarize_aggregates_account() {
        let (service, _store) = setup();
        let mut account = invested_account();

        let summary = service.summarize(&mut account).unwrap();

        // 14000 and 5000 net invested, both worth 10% more.
        assert_eq!(summary.gross_asset_value, dec!(20900));
        assert_eq!(summary.account_total, dec!(101900));
        assert_eq!(summary.earnings_total, dec!(1900));
        assert_eq!(summary.available_cash, dec!(81000));
        assert_eq!(summary.asset_transfers, dec!(100000));

        assert_eq!(summary.holdings.len(), 2);
        let alpha = &summary.holdings[0];
        assert_eq!(alpha.portfolio_id, "alpha");
        assert_eq!(alpha.name, "Alpha Weather");
        assert_eq!(alpha.total_invested, dec!(14000));
        assert_eq!(alpha.current_value, dec!(15400.0));
        assert_eq!(alpha.earnings, dec!(1400.0));

        let beta = &summary.holdings[1];
        assert_eq!(beta.portfolio_id, "beta");
        assert_eq!(beta.current_value, dec!(5500.0));
        assert_eq!(beta.earnings, dec!(500.0));
    }

    #[test]
    fn test_summarize_risk_figures() {
        let (service, _store) = setup();
        let mut account = invested_account();

        let summary = service.summarize(&mut account).unwrap();

        let alpha = &summary.holdings[0];
        assert_eq!(alpha.risk_pct, dec!(11.3));
        assert!(alpha
            .risk_summary
            .contains("99% probability of not losing more than 11.3% in a year"));

        let beta = &summary.holdings[1];
        assert_eq!(beta.risk_pct, dec!(8.7));
    }

    #[test]
    fn test_summarize_floors_risk_at_five_percent() {
        let (service, _store) = setup();
        let mut account = AccountState::new("u1");
        account
            .holding_mut("lowrisk")
            .push_ordered(record(
                "lowrisk",
                TransactionKind::UserBuy,
                instant(2, 16),
                dec!(1000),
                dec!(1000),
            ));
        account.holding_mut("anomaly").push_ordered(record(
            "anomaly",
            TransactionKind::UserBuy,
            instant(2, 16),
            dec!(1000),
            dec!(1000),
        ));

        let summary = service.summarize(&mut account).unwrap();

        // -2.5% VaR shows as the 5% floor; a positive VaR is clamped too.
        for holding in &summary.holdings {
            assert_eq!(holding.risk_pct, dec!(5));
            assert!(holding
                .risk_summary
                .contains("not losing more than 5% in a year"));
        }
    }

    #[test]
    fn test_summarize_refreshes_cached_gross_value_and_saves() {
        let (service, store) = setup();
        let mut account = invested_account();
        assert_eq!(account.gross_asset_value, dec!(0));

        service.summarize(&mut account).unwrap();

        assert_eq!(account.gross_asset_value, dec!(20900));
        let saved = store.load("u1").unwrap().unwrap();
        assert_eq!(saved.gross_asset_value, dec!(20900));
        assert_eq!(saved, account);
    }

    #[test]
    fn test_summarize_empty_account() {
        let (service, _store) = setup();
        let mut account = AccountState::new("u1");
        account.available_cash = dec!(500);
        account.asset_transfers = dec!(1000);

        let summary = service.summarize(&mut account).unwrap();

        assert!(summary.holdings.is_empty());
        assert_eq!(summary.gross_asset_value, dec!(0));
        assert_eq!(summary.account_total, dec!(500));
        assert_eq!(summary.earnings_total, dec!(-500));
    }

    // ==================== Timelines ====================

    #[test]
    fn test_timeline_series_and_markers() {
        let (service, _store) = setup();
        let mut account = AccountState::new("u1");

        let buy_at = instant(2, 16);
        let mark_at = instant(10, 16);
        let sell_at = instant(18, 16);
        let rebalance_at = instant(25, 16);

        let alpha = account.holding_mut("alpha");
        alpha.push_ordered(record(
            "alpha",
            TransactionKind::UserBuy,
            buy_at,
            dec!(15000),
            dec!(15000),
        ));
        alpha.push_ordered(TransactionRecord::cross_mark("alpha", mark_at, dec!(15200)));
        alpha.push_ordered(record(
            "alpha",
            TransactionKind::UserSell,
            sell_at,
            dec!(-5000),
            dec!(10100),
        ));
        alpha.push_ordered(record(
            "alpha",
            TransactionKind::SystemRebalance,
            rebalance_at,
            dec!(0),
            dec!(10150),
        ));

        let timeline = service.transaction_timeline(&account).unwrap();

        assert_eq!(timeline.series.len(), 1);
        let series = &timeline.series[0];
        assert_eq!(series.name, "Alpha Weather");
        assert_eq!(series.visible, Some(true));
        assert_eq!(series.data.len(), 4);
        assert_eq!(
            series.data[0],
            crate::valuation::ChartPoint(buy_at.timestamp_millis(), dec!(15000))
        );
        assert_eq!(series.data[1].1, dec!(15200));

        // Only user actions get axis annotations.
        assert_eq!(timeline.buy_markers.len(), 1);
        assert_eq!(timeline.buy_markers[0].timestamp_ms, buy_at.timestamp_millis());
        assert_eq!(timeline.buy_markers[0].label, "B");
        assert_eq!(timeline.sell_markers.len(), 1);
        assert_eq!(timeline.sell_markers[0].timestamp_ms, sell_at.timestamp_millis());
        assert_eq!(timeline.sell_markers[0].label, "S");
    }

    #[test]
    fn test_timeline_empty_account() {
        let (service, _store) = setup();
        let account = AccountState::new("u1");

        let timeline = service.transaction_timeline(&account).unwrap();
        assert!(timeline.series.is_empty());
        assert!(timeline.buy_markers.is_empty());
        assert!(timeline.sell_markers.is_empty());
    }
}
