//! Tests for the dashboard comparison.

use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{DashboardService, change_rate};
use crate::reports::PeriodSums;

#[rstest]
#[case::both_zero(dec!(0), dec!(0), dec!(0))]
#[case::growth_from_nothing(dec!(100), dec!(0), dec!(100))]
#[case::doubled(dec!(200), dec!(100), dec!(100))]
#[case::halved(dec!(50), dec!(100), dec!(-50))]
#[case::loss_from_nothing(dec!(-25), dec!(0), dec!(100))]
#[case::rounded(dec!(110), dec!(300), dec!(-63))]
fn test_change_rate_policy(
    #[case] current: Decimal,
    #[case] previous: Decimal,
    #[case] expected: Decimal,
) {
    assert_eq!(change_rate(current, previous), expected);
}

#[test]
fn test_change_rate_is_always_finite() {
    // The divide-by-zero branches must produce plain zeros and hundreds,
    // whatever the current value.
    for current in [dec!(0), dec!(0.01), dec!(-0.01), dec!(99999999.99)] {
        let rate = change_rate(current, Decimal::ZERO);
        assert!(rate == Decimal::ZERO || rate == Decimal::ONE_HUNDRED);
    }
}

#[test]
fn test_summarize_combines_both_months() {
    let current = PeriodSums {
        revenue: dec!(300000),
        expense: dec!(50000),
        total_hours: dec!(40),
    };
    let previous = PeriodSums {
        revenue: dec!(150000),
        expense: dec!(100000),
        total_hours: dec!(0),
    };

    let summary = DashboardService::summarize(&current, &previous);

    assert_eq!(summary.current_month.net_profit, dec!(250000));
    assert_eq!(summary.previous_month.net_profit, dec!(50000));
    assert_eq!(summary.change_rate.revenue, dec!(100));
    assert_eq!(summary.change_rate.expense, dec!(-50));
    assert_eq!(summary.change_rate.net_profit, dec!(400));
    // Hours appeared against an empty previous month.
    assert_eq!(summary.change_rate.total_hours, dec!(100));
}

#[test]
fn test_snapshot_net_profit() {
    let snapshot = DashboardService::snapshot(&PeriodSums {
        revenue: dec!(10.50),
        expense: dec!(0.30),
        total_hours: dec!(1.5),
    });

    assert_eq!(snapshot.net_profit, dec!(10.20));
}
