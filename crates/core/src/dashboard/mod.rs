//! Month-over-month dashboard comparison.
//!
//! Compares a target calendar month against the month before it and
//! derives a change rate per metric.

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{ChangeRates, DashboardSummary, MonthSnapshot};

use rust_decimal::Decimal;
use sideline_shared::types::{percent_of, round_whole};

use crate::reports::PeriodSums;

/// Service computing the dashboard summary.
pub struct DashboardService;

impl DashboardService {
    /// Builds a month snapshot from period sums.
    #[must_use]
    pub fn snapshot(sums: &PeriodSums) -> MonthSnapshot {
        MonthSnapshot {
            revenue: sums.revenue,
            expense: sums.expense,
            net_profit: sums.revenue - sums.expense,
            total_hours: sums.total_hours,
        }
    }

    /// Compares the target month against the previous one.
    ///
    /// Both inputs are independent aggregates; combining them here keeps
    /// the change-rate policy in one place.
    #[must_use]
    pub fn summarize(current: &PeriodSums, previous: &PeriodSums) -> DashboardSummary {
        let current_month = Self::snapshot(current);
        let previous_month = Self::snapshot(previous);
        let change_rate = ChangeRates {
            revenue: change_rate(current_month.revenue, previous_month.revenue),
            expense: change_rate(current_month.expense, previous_month.expense),
            net_profit: change_rate(current_month.net_profit, previous_month.net_profit),
            total_hours: change_rate(current_month.total_hours, previous_month.total_hours),
        };

        DashboardSummary {
            current_month,
            previous_month,
            change_rate,
        }
    }
}

/// Month-over-month change rate in whole percent.
///
/// A zero previous value cannot anchor a ratio: the rate is 0 when both
/// months are zero, and pinned to 100 when activity appears against an
/// empty previous month. Otherwise `round((current - previous) / previous
/// * 100)`. Always finite.
#[must_use]
pub fn change_rate(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        if current.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        }
    } else {
        percent_of(current - previous, previous).map_or(Decimal::ZERO, round_whole)
    }
}
