//! Report data types.
//!
//! Input rows mirror what the store adapter hands over (exact decimal
//! sums, never floats); output types are the fully computed shapes the
//! presentation layer serializes. Response decimals are already rounded,
//! so they serialize as plain JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sideline_shared::types::SourceId;

/// Transaction kind: money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money earned.
    Revenue,
    /// Money spent.
    Expense,
}

// ============================================================================
// Store adapter rows (calculator inputs)
// ============================================================================

/// Raw figures of a single transaction.
#[derive(Debug, Clone)]
pub struct TransactionFigures {
    /// Revenue or expense.
    pub kind: TransactionKind,
    /// Monetary amount (non-negative).
    pub amount: Decimal,
    /// Time invested; `None` means "not tracked", distinct from zero.
    pub hours: Option<Decimal>,
}

/// Revenue/expense sums for one month present in the data.
#[derive(Debug, Clone)]
pub struct MonthlySums {
    /// Month key, `"YYYY-MM"`.
    pub month: String,
    /// Revenue sum.
    pub revenue: Decimal,
    /// Expense sum.
    pub expense: Decimal,
}

/// Aggregate sums over one period.
#[derive(Debug, Clone, Default)]
pub struct PeriodSums {
    /// Revenue sum.
    pub revenue: Decimal,
    /// Expense sum.
    pub expense: Decimal,
    /// Sum of tracked hours.
    pub total_hours: Decimal,
}

/// Aggregate sums for one source.
#[derive(Debug, Clone)]
pub struct SourceSums {
    /// Source ID.
    pub source_id: SourceId,
    /// Source name.
    pub name: String,
    /// Revenue sum.
    pub revenue: Decimal,
    /// Expense sum.
    pub expense: Decimal,
    /// Sum of tracked hours.
    pub total_hours: Decimal,
}

/// Revenue total of one source.
#[derive(Debug, Clone)]
pub struct SourceRevenue {
    /// Source ID.
    pub source_id: SourceId,
    /// Source name.
    pub name: String,
    /// Revenue sum.
    pub revenue: Decimal,
}

/// Revenue of one source in one month.
#[derive(Debug, Clone)]
pub struct SourceMonthSum {
    /// Source ID.
    pub source_id: SourceId,
    /// Month key, `"YYYY-MM"`.
    pub month: String,
    /// Revenue sum for that month.
    pub revenue: Decimal,
}

// ============================================================================
// Computed report shapes (calculator outputs)
// ============================================================================

/// Summary metrics for one source over an optional window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetrics {
    /// Total revenue.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Total expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    /// Revenue minus expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    /// Sum of tracked hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_hours: Decimal,
    /// Net profit per tracked hour, rounded to a whole number; zero when
    /// no hours were tracked.
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    /// Net profit over expense in percent, one decimal place; zero when
    /// there was no expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub roi: Decimal,
}

/// One month bucket of a trend series (zero-filled).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStat {
    /// Month key, `"YYYY-MM"`.
    pub month: String,
    /// Revenue sum.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Expense sum.
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    /// Revenue minus expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
}

/// Per-source performance row, ranked by net profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePerformance {
    /// Source ID.
    pub source_id: SourceId,
    /// Source name.
    pub name: String,
    /// Revenue minus expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    /// Total revenue.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// Total expense.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    /// Sum of tracked hours.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_hours: Decimal,
    /// Net profit over expense in percent, one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub roi: Decimal,
    /// Net profit per tracked hour, whole number.
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
}

/// Revenue share of one source in the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    /// Source ID.
    pub source_id: SourceId,
    /// Source name.
    pub name: String,
    /// Revenue sum.
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// Share of total revenue in percent, one decimal place; zero when
    /// total revenue is zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

/// One month bucket of one top source's revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMonthlyRevenue {
    /// Month key, `"YYYY-MM"`.
    pub month: String,
    /// Source ID.
    pub source_id: SourceId,
    /// Source name.
    pub source_name: String,
    /// Revenue sum for that month (zero when none).
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}
