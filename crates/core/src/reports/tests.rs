//! Tests for the report calculators.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sideline_shared::types::SourceId;

use super::service::ReportService;
use super::types::{
    MonthlySums, SourceMonthSum, SourceRevenue, SourceSums, TransactionFigures, TransactionKind,
};

/// Strategy for non-negative amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn revenue(amount: Decimal, hours: Option<Decimal>) -> TransactionFigures {
    TransactionFigures {
        kind: TransactionKind::Revenue,
        amount,
        hours,
    }
}

fn expense(amount: Decimal, hours: Option<Decimal>) -> TransactionFigures {
    TransactionFigures {
        kind: TransactionKind::Expense,
        amount,
        hours,
    }
}

fn months(keys: &[&str]) -> Vec<String> {
    keys.iter().map(ToString::to_string).collect()
}

proptest! {
    /// Whatever the amounts, a source without tracked hours gets an hourly
    /// rate of exactly zero - never a panic, NaN, or infinity.
    #[test]
    fn prop_hourly_rate_zero_without_hours(
        revenue_amount in amount_strategy(),
        expense_amount in amount_strategy(),
    ) {
        let summary = ReportService::summarize(&[
            revenue(revenue_amount, None),
            expense(expense_amount, None),
        ]);

        prop_assert_eq!(summary.total_hours, Decimal::ZERO);
        prop_assert_eq!(summary.hourly_rate, Decimal::ZERO);
    }

    /// ROI is exactly zero whenever there is no expense, for any net profit.
    #[test]
    fn prop_roi_zero_without_expense(
        revenue_amount in amount_strategy(),
        hours in 0i64..10_000,
    ) {
        let summary = ReportService::summarize(&[
            revenue(revenue_amount, Some(Decimal::from(hours))),
        ]);

        prop_assert_eq!(summary.expense, Decimal::ZERO);
        prop_assert_eq!(summary.roi, Decimal::ZERO);
    }

    /// Net profit is always revenue minus expense, exactly.
    #[test]
    fn prop_net_profit_is_revenue_minus_expense(
        revenue_amount in amount_strategy(),
        expense_amount in amount_strategy(),
    ) {
        let summary = ReportService::summarize(&[
            revenue(revenue_amount, None),
            expense(expense_amount, None),
        ]);

        prop_assert_eq!(summary.net_profit, revenue_amount - expense_amount);
    }

    /// The zero-filled series always has exactly one entry per month key,
    /// in key order, whatever sums the store produced.
    #[test]
    fn prop_monthly_stats_covers_every_bucket(
        data_month in 0usize..12,
        revenue_amount in amount_strategy(),
    ) {
        let keys: Vec<String> = (1..=12).map(|m| format!("2026-{m:02}")).collect();
        let sums = vec![MonthlySums {
            month: keys[data_month].clone(),
            revenue: revenue_amount,
            expense: Decimal::ZERO,
        }];

        let stats = ReportService::monthly_stats(&keys, &sums);

        prop_assert_eq!(stats.len(), keys.len());
        for (stat, key) in stats.iter().zip(&keys) {
            prop_assert_eq!(&stat.month, key);
        }
        prop_assert_eq!(stats[data_month].revenue, revenue_amount);
    }

    /// Ranking is ordered by net profit, descending.
    #[test]
    fn prop_ranking_is_sorted_descending(
        amounts in prop::collection::vec((amount_strategy(), amount_strategy()), 1..10),
    ) {
        let rows: Vec<SourceSums> = amounts
            .into_iter()
            .enumerate()
            .map(|(i, (rev, exp))| SourceSums {
                source_id: SourceId::new(),
                name: format!("Source {i}"),
                revenue: rev,
                expense: exp,
                total_hours: Decimal::ZERO,
            })
            .collect();

        let ranked = ReportService::rank_sources(rows);

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].net_profit >= pair[1].net_profit);
        }
    }

    /// Portfolio shares always land in [0, 100] for non-negative revenues.
    #[test]
    fn prop_portfolio_shares_bounded(
        revenues in prop::collection::vec(amount_strategy(), 1..10),
    ) {
        let rows: Vec<SourceRevenue> = revenues
            .into_iter()
            .enumerate()
            .map(|(i, rev)| SourceRevenue {
                source_id: SourceId::new(),
                name: format!("Source {i}"),
                revenue: rev,
            })
            .collect();

        let items = ReportService::portfolio(rows);

        for item in items {
            prop_assert!(item.percentage >= Decimal::ZERO);
            prop_assert!(item.percentage <= Decimal::ONE_HUNDRED);
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_summary_worked_example() {
        let summary = ReportService::summarize(&[
            revenue(dec!(100000), Some(dec!(10))),
            expense(dec!(20000), Some(dec!(0))),
            revenue(dec!(50000), Some(dec!(5))),
        ]);

        assert_eq!(summary.revenue, dec!(150000));
        assert_eq!(summary.expense, dec!(20000));
        assert_eq!(summary.net_profit, dec!(130000));
        assert_eq!(summary.total_hours, dec!(15));
        // 130000 / 15 = 8666.67 rounds up to 8667.
        assert_eq!(summary.hourly_rate, dec!(8667));
        assert_eq!(summary.roi, dec!(650.0));
    }

    #[test]
    fn test_summary_empty_input() {
        let summary = ReportService::summarize(&[]);

        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.net_profit, Decimal::ZERO);
        assert_eq!(summary.hourly_rate, Decimal::ZERO);
        assert_eq!(summary.roi, Decimal::ZERO);
    }

    #[test]
    fn test_summary_untracked_hours_are_not_zero_hours() {
        // Two revenue entries: one with tracked hours, one untracked.
        // Only the tracked hours count; the untracked entry must not
        // collapse the metric to "zero hours worked".
        let summary = ReportService::summarize(&[
            revenue(dec!(1000), Some(dec!(4))),
            revenue(dec!(1000), None),
        ]);

        assert_eq!(summary.total_hours, dec!(4));
        assert_eq!(summary.hourly_rate, dec!(500));
    }

    #[test]
    fn test_summary_decimal_amounts_stay_exact() {
        let summary = ReportService::summarize(&[
            revenue(dec!(0.1), None),
            revenue(dec!(0.2), None),
        ]);

        assert_eq!(summary.revenue, dec!(0.3));
    }

    #[test]
    fn test_ranking_worked_example() {
        let first = SourceId::new();
        let second = SourceId::new();
        let ranked = ReportService::rank_sources(vec![
            SourceSums {
                source_id: second,
                name: "Blog".into(),
                revenue: dec!(50000),
                expense: dec!(0),
                total_hours: dec!(5),
            },
            SourceSums {
                source_id: first,
                name: "Freelance".into(),
                revenue: dec!(120000),
                expense: dec!(20000),
                total_hours: dec!(10),
            },
        ]);

        assert_eq!(ranked[0].source_id, first);
        assert_eq!(ranked[0].net_profit, dec!(100000));
        assert_eq!(ranked[0].hourly_rate, dec!(10000));
        assert_eq!(ranked[0].roi, dec!(500.0));

        assert_eq!(ranked[1].source_id, second);
        assert_eq!(ranked[1].net_profit, dec!(50000));
        assert_eq!(ranked[1].hourly_rate, dec!(10000));
        assert_eq!(ranked[1].roi, Decimal::ZERO);
    }

    #[test]
    fn test_ranking_ties_keep_input_order() {
        let a = SourceId::new();
        let b = SourceId::new();
        let tied = |id, name: &str| SourceSums {
            source_id: id,
            name: name.into(),
            revenue: dec!(1000),
            expense: dec!(500),
            total_hours: Decimal::ZERO,
        };

        let ranked = ReportService::rank_sources(vec![tied(a, "First"), tied(b, "Second")]);

        assert_eq!(ranked[0].source_id, a);
        assert_eq!(ranked[1].source_id, b);
    }

    #[test]
    fn test_portfolio_worked_example() {
        let items = ReportService::portfolio(vec![
            SourceRevenue {
                source_id: SourceId::new(),
                name: "A".into(),
                revenue: dec!(100),
            },
            SourceRevenue {
                source_id: SourceId::new(),
                name: "B".into(),
                revenue: dec!(300),
            },
        ]);

        assert_eq!(items[0].percentage, dec!(25.0));
        assert_eq!(items[1].percentage, dec!(75.0));
    }

    #[test]
    fn test_portfolio_zero_total_revenue() {
        let items = ReportService::portfolio(vec![
            SourceRevenue {
                source_id: SourceId::new(),
                name: "A".into(),
                revenue: Decimal::ZERO,
            },
            SourceRevenue {
                source_id: SourceId::new(),
                name: "B".into(),
                revenue: Decimal::ZERO,
            },
        ]);

        assert!(items.iter().all(|item| item.percentage == Decimal::ZERO));
    }

    #[test]
    fn test_monthly_stats_zero_fills_gaps() {
        let keys = months(&["2026-01", "2026-02", "2026-03"]);
        let sums = vec![MonthlySums {
            month: "2026-02".into(),
            revenue: dec!(500),
            expense: dec!(200),
        }];

        let stats = ReportService::monthly_stats(&keys, &sums);

        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].month, "2026-01");
        assert_eq!(stats[0].revenue, Decimal::ZERO);
        assert_eq!(stats[0].net_profit, Decimal::ZERO);
        assert_eq!(stats[1].revenue, dec!(500));
        assert_eq!(stats[1].net_profit, dec!(300));
        assert_eq!(stats[2].month, "2026-03");
        assert_eq!(stats[2].expense, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_revenue_by_source_zero_fills_per_source() {
        let keys = months(&["2026-01", "2026-02", "2026-03"]);
        let alpha = SourceId::new();
        let beta = SourceId::new();
        let tops = vec![
            SourceRevenue {
                source_id: alpha,
                name: "Alpha".into(),
                revenue: dec!(900),
            },
            SourceRevenue {
                source_id: beta,
                name: "Beta".into(),
                revenue: dec!(100),
            },
        ];
        let monthly = vec![
            SourceMonthSum {
                source_id: alpha,
                month: "2026-01".into(),
                revenue: dec!(900),
            },
            SourceMonthSum {
                source_id: beta,
                month: "2026-03".into(),
                revenue: dec!(100),
            },
        ];

        let rows = ReportService::monthly_revenue_by_source(&keys, &tops, &monthly);

        // Two sources, three buckets each, source-major order.
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].source_name, "Alpha");
        assert_eq!(rows[0].revenue, dec!(900));
        assert_eq!(rows[1].revenue, Decimal::ZERO);
        assert_eq!(rows[3].source_name, "Beta");
        assert_eq!(rows[3].revenue, Decimal::ZERO);
        assert_eq!(rows[5].month, "2026-03");
        assert_eq!(rows[5].revenue, dec!(100));
    }

    #[test]
    fn test_monthly_revenue_by_source_omits_non_top_rows() {
        let keys = months(&["2026-01"]);
        let alpha = SourceId::new();
        let tops = vec![SourceRevenue {
            source_id: alpha,
            name: "Alpha".into(),
            revenue: dec!(10),
        }];
        // A month sum for a source that did not make the top list.
        let monthly = vec![SourceMonthSum {
            source_id: SourceId::new(),
            month: "2026-01".into(),
            revenue: dec!(9999),
        }];

        let rows = ReportService::monthly_revenue_by_source(&keys, &tops, &monthly);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_id, alpha);
        assert_eq!(rows[0].revenue, Decimal::ZERO);
    }

    #[test]
    fn test_reports_are_deterministic() {
        let rows = || {
            vec![
                SourceSums {
                    source_id: SourceId::from_uuid(uuid::Uuid::nil()),
                    name: "A".into(),
                    revenue: dec!(10.50),
                    expense: dec!(3.25),
                    total_hours: dec!(2),
                },
            ]
        };

        assert_eq!(
            ReportService::rank_sources(rows()),
            ReportService::rank_sources(rows())
        );
    }
}
