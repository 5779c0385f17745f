#[cfg(test)]
mod tests {
    use crate::ledger::{
        PortfolioHolding, TransactionKind, TransactionReceipt, TransactionRecord,
        TransactionRequest,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn instant(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, day, hour, 30, 0).single().unwrap()
    }

    fn record(kind: TransactionKind, timestamp: DateTime<Utc>, amount: Decimal) -> TransactionRecord {
        TransactionRecord::new("p1", kind, timestamp, amount, Vec::new(), dec!(0))
    }

    // ==================== TransactionKind ====================

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::UserBuy).unwrap(),
            "\"USER_BUY\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::SystemRebalance).unwrap(),
            "\"SYSTEM_REBALANCE\""
        );
        assert_eq!(
            serde_json::from_str::<TransactionKind>("\"CROSS_MARK\"").unwrap(),
            TransactionKind::CrossMark
        );
    }

    #[test]
    fn test_kind_classification() {
        assert!(TransactionKind::UserBuy.is_user());
        assert!(TransactionKind::UserSell.is_user());
        assert!(!TransactionKind::SystemRebalance.is_user());
        assert!(TransactionKind::CrossMark.is_mark());
        assert!(!TransactionKind::UserSell.is_mark());
    }

    // ==================== PortfolioHolding ordering ====================

    #[test]
    fn test_push_ordered_appends_chronological_records() {
        let mut holding = PortfolioHolding::new();
        holding.push_ordered(record(TransactionKind::UserBuy, instant(2, 16), dec!(100)));
        holding.push_ordered(record(TransactionKind::UserBuy, instant(5, 16), dec!(50)));

        let stamps: Vec<_> = holding.transactions.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![instant(2, 16), instant(5, 16)]);
        assert_eq!(holding.len(), 2);
    }

    #[test]
    fn test_push_ordered_places_back_dated_record() {
        let mut holding = PortfolioHolding::new();
        holding.push_ordered(record(TransactionKind::UserBuy, instant(2, 16), dec!(100)));
        holding.push_ordered(record(TransactionKind::UserBuy, instant(10, 16), dec!(50)));
        // Arrives late but dated between the two above.
        holding.push_ordered(record(TransactionKind::UserSell, instant(5, 16), dec!(-20)));

        let kinds: Vec<TransactionKind> =
            holding.transactions.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::UserBuy,
                TransactionKind::UserSell,
                TransactionKind::UserBuy
            ]
        );
    }

    #[test]
    fn test_push_ordered_keeps_arrival_order_on_ties() {
        let mut holding = PortfolioHolding::new();
        let ts = instant(2, 16);
        holding.push_ordered(record(TransactionKind::UserBuy, ts, dec!(100)));
        holding.push_ordered(record(TransactionKind::UserSell, ts, dec!(-30)));

        assert_eq!(holding.transactions[0].kind, TransactionKind::UserBuy);
        assert_eq!(holding.transactions[1].kind, TransactionKind::UserSell);
    }

    // ==================== Cross-mark suppression ====================

    #[test]
    fn test_push_mark_suppresses_same_instant_duplicate() {
        let mut holding = PortfolioHolding::new();
        let ts = instant(2, 16);
        assert!(holding.push_mark(TransactionRecord::cross_mark("p1", ts, dec!(500))));
        assert!(!holding.push_mark(TransactionRecord::cross_mark("p1", ts, dec!(500))));
        assert_eq!(holding.len(), 1);
    }

    #[test]
    fn test_push_mark_allows_distinct_instants() {
        let mut holding = PortfolioHolding::new();
        assert!(holding.push_mark(TransactionRecord::cross_mark("p1", instant(2, 16), dec!(500))));
        assert!(holding.push_mark(TransactionRecord::cross_mark("p1", instant(3, 16), dec!(510))));
        assert_eq!(holding.len(), 2);
    }

    #[test]
    fn test_push_mark_not_blocked_by_real_record() {
        let mut holding = PortfolioHolding::new();
        let ts = instant(2, 16);
        holding.push_ordered(record(TransactionKind::UserBuy, ts, dec!(100)));
        // A real record at the instant is not a mark; the mark still lands.
        assert!(holding.push_mark(TransactionRecord::cross_mark("p1", ts, dec!(500))));
        assert_eq!(holding.len(), 2);
        assert_eq!(holding.transactions[1].kind, TransactionKind::CrossMark);
    }

    #[test]
    fn test_push_mark_checks_whole_instant_not_just_predecessor() {
        let mut holding = PortfolioHolding::new();
        let ts = instant(2, 16);
        assert!(holding.push_mark(TransactionRecord::cross_mark("p1", ts, dec!(500))));
        // A real record arriving later at the same instant lands after the
        // mark, but does not hide it from the duplicate check.
        holding.push_ordered(record(TransactionKind::UserBuy, ts, dec!(100)));
        assert!(!holding.push_mark(TransactionRecord::cross_mark("p1", ts, dec!(500))));
        assert_eq!(holding.len(), 2);
    }

    // ==================== Requests and receipts ====================

    #[test]
    fn test_sell_request_negates_amount() {
        let request = TransactionRequest::sell("p1", dec!(5000), None);
        assert_eq!(request.amount, dec!(-5000));
        assert_eq!(request.kind, TransactionKind::UserSell);

        let request = TransactionRequest::buy("p1", dec!(5000), None);
        assert_eq!(request.amount, dec!(5000));

        let request = TransactionRequest::rebalance("p1", None);
        assert_eq!(request.amount, dec!(0));
        assert_eq!(request.kind, TransactionKind::SystemRebalance);
    }

    #[test]
    fn test_receipt_unfilled_amount() {
        let receipt = TransactionReceipt {
            record_id: "r1".to_string(),
            portfolio_id: "p1".to_string(),
            kind: TransactionKind::UserSell,
            timestamp: instant(2, 16),
            requested_amount: dec!(-7000),
            invested_amount: dec!(-5200),
            cash_delta: dec!(5200),
            value_at_date: dec!(0),
        };
        assert_eq!(receipt.unfilled_amount(), dec!(1800));
    }

    #[test]
    fn test_cross_mark_record_shape() {
        let mark = TransactionRecord::cross_mark("p2", instant(2, 16), dec!(123.45));
        assert_eq!(mark.kind, TransactionKind::CrossMark);
        assert_eq!(mark.amount, dec!(0));
        assert!(mark.allocation.is_empty());
        assert_eq!(mark.value_at_date, dec!(123.45));
        assert!(!mark.id.is_empty());
    }
}
