//! Tests for the pure folds behind the report repository.

use chrono::{DateTime, FixedOffset, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::entities::{
    income_sources,
    sea_orm_active_enums::{SourceType, TransactionType},
    transactions,
};

use super::report::{
    fold_by_source, fold_monthly, fold_period, fold_source_month_revenue, to_figures,
};

fn timestamp() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2026-01-01T00:00:00+00:00").unwrap()
}

fn tx(
    source_id: Uuid,
    kind: TransactionType,
    amount: Decimal,
    date: &str,
    hours: Option<Decimal>,
) -> transactions::Model {
    transactions::Model {
        id: Uuid::new_v4(),
        source_id,
        transaction_type: kind,
        amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: "test".into(),
        is_recurring: false,
        hours,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn source(name: &str) -> income_sources::Model {
    income_sources::Model {
        id: Uuid::new_v4(),
        name: name.into(),
        source_type: SourceType::Etc,
        description: None,
        is_active: true,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

#[test]
fn test_fold_monthly_groups_and_orders_chronologically() {
    let source_id = Uuid::new_v4();
    let rows = vec![
        tx(source_id, TransactionType::Revenue, dec!(300), "2026-02-10", None),
        tx(source_id, TransactionType::Expense, dec!(50), "2025-12-31", None),
        tx(source_id, TransactionType::Revenue, dec!(100), "2026-02-01", None),
        tx(source_id, TransactionType::Revenue, dec!(20), "2025-12-01", None),
    ];

    let sums = fold_monthly(&rows);

    assert_eq!(sums.len(), 2);
    assert_eq!(sums[0].month, "2025-12");
    assert_eq!(sums[0].revenue, dec!(20));
    assert_eq!(sums[0].expense, dec!(50));
    assert_eq!(sums[1].month, "2026-02");
    assert_eq!(sums[1].revenue, dec!(400));
    assert_eq!(sums[1].expense, Decimal::ZERO);
}

#[test]
fn test_fold_monthly_decimal_sums_stay_exact() {
    let source_id = Uuid::new_v4();
    let rows = vec![
        tx(source_id, TransactionType::Revenue, dec!(0.1), "2026-03-01", None),
        tx(source_id, TransactionType::Revenue, dec!(0.2), "2026-03-02", None),
    ];

    let sums = fold_monthly(&rows);

    assert_eq!(sums[0].revenue, dec!(0.3));
}

#[test]
fn test_fold_period_ignores_untracked_hours() {
    let source_id = Uuid::new_v4();
    let rows = vec![
        tx(source_id, TransactionType::Revenue, dec!(100), "2026-01-05", Some(dec!(2.5))),
        tx(source_id, TransactionType::Revenue, dec!(100), "2026-01-06", None),
        tx(source_id, TransactionType::Expense, dec!(30), "2026-01-07", Some(dec!(1))),
    ];

    let sums = fold_period(&rows);

    assert_eq!(sums.revenue, dec!(200));
    assert_eq!(sums.expense, dec!(30));
    assert_eq!(sums.total_hours, dec!(3.5));
}

#[test]
fn test_fold_by_source_keeps_order_and_zero_fills() {
    let first = source("First");
    let second = source("Second");
    let rows = vec![tx(
        second.id,
        TransactionType::Revenue,
        dec!(500),
        "2026-01-05",
        Some(dec!(4)),
    )];

    let sums = fold_by_source(&[first.clone(), second.clone()], &rows);

    assert_eq!(sums.len(), 2);
    assert_eq!(sums[0].name, "First");
    assert_eq!(sums[0].revenue, Decimal::ZERO);
    assert_eq!(sums[0].total_hours, Decimal::ZERO);
    assert_eq!(sums[1].name, "Second");
    assert_eq!(sums[1].revenue, dec!(500));
    assert_eq!(sums[1].total_hours, dec!(4));
}

#[test]
fn test_fold_source_month_revenue_skips_expenses() {
    let source_id = Uuid::new_v4();
    let rows = vec![
        tx(source_id, TransactionType::Revenue, dec!(100), "2026-01-05", None),
        tx(source_id, TransactionType::Expense, dec!(999), "2026-01-06", None),
        tx(source_id, TransactionType::Revenue, dec!(50), "2026-02-01", None),
    ];

    let sums = fold_source_month_revenue(&rows);

    assert_eq!(sums.len(), 2);
    assert_eq!(sums[0].month, "2026-01");
    assert_eq!(sums[0].revenue, dec!(100));
    assert_eq!(sums[1].month, "2026-02");
    assert_eq!(sums[1].revenue, dec!(50));
}

#[test]
fn test_to_figures_keeps_untracked_hours_distinct() {
    let row = tx(
        Uuid::new_v4(),
        TransactionType::Expense,
        dec!(12.34),
        "2026-01-05",
        None,
    );

    let figures = to_figures(&row);

    assert_eq!(figures.amount, dec!(12.34));
    assert_eq!(figures.hours, None);
}

proptest! {
    /// Period revenue always equals the exact sum of the revenue rows.
    #[test]
    fn prop_fold_period_revenue_is_exact_sum(
        amounts in prop::collection::vec(0i64..10_000_000i64, 0..20),
    ) {
        let source_id = Uuid::new_v4();
        let rows: Vec<transactions::Model> = amounts
            .iter()
            .map(|n| tx(source_id, TransactionType::Revenue, Decimal::new(*n, 2), "2026-01-05", None))
            .collect();

        let expected: Decimal = amounts.iter().map(|n| Decimal::new(*n, 2)).sum();

        prop_assert_eq!(fold_period(&rows).revenue, expected);
    }

    /// Monthly buckets partition the rows: bucket sums add back up to the
    /// period totals.
    #[test]
    fn prop_fold_monthly_partitions_period(
        data in prop::collection::vec((1u32..=12u32, 0i64..10_000_000i64), 0..20),
    ) {
        let source_id = Uuid::new_v4();
        let rows: Vec<transactions::Model> = data
            .iter()
            .map(|(month, n)| {
                tx(
                    source_id,
                    TransactionType::Revenue,
                    Decimal::new(*n, 2),
                    &format!("2026-{month:02}-15"),
                    None,
                )
            })
            .collect();

        let bucketed: Decimal = fold_monthly(&rows).iter().map(|m| m.revenue).sum();

        prop_assert_eq!(bucketed, fold_period(&rows).revenue);
    }
}
