//! Dashboard data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregates of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSnapshot {
    /// Revenue sum.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Expense sum.
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    /// Revenue minus expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    /// Sum of tracked hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_hours: Decimal,
}

/// Month-over-month change rates, in whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRates {
    /// Revenue change rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Expense change rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    /// Net profit change rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    /// Tracked hours change rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_hours: Decimal,
}

/// Comparison of the target month against the month before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Target month aggregates.
    pub current_month: MonthSnapshot,
    /// Previous month aggregates.
    pub previous_month: MonthSnapshot,
    /// Change per metric.
    pub change_rate: ChangeRates,
}
