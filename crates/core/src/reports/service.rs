//! Report calculators.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sideline_shared::types::{SourceId, percent_of, round_tenth, round_whole, safe_div};

use super::types::{
    MonthlyStat, MonthlySums, PortfolioItem, SourceMonthSum, SourceMonthlyRevenue,
    SourcePerformance, SourceRevenue, SourceSums, SummaryMetrics, TransactionFigures,
    TransactionKind,
};

/// Service computing derived report metrics.
///
/// All functions are pure: they accept already-filtered aggregates (or raw
/// per-transaction figures for the single-source summary) and return fully
/// rounded, zero-filled structures. Running a calculator twice over equal
/// inputs yields equal output.
pub struct ReportService;

impl ReportService {
    /// Summarizes raw transaction figures for a single source.
    ///
    /// Untracked hours contribute nothing to `total_hours`; a source with
    /// no tracked hours gets an hourly rate of zero rather than a division
    /// error.
    #[must_use]
    pub fn summarize(figures: &[TransactionFigures]) -> SummaryMetrics {
        let mut revenue = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        let mut total_hours = Decimal::ZERO;

        for figure in figures {
            match figure.kind {
                TransactionKind::Revenue => revenue += figure.amount,
                TransactionKind::Expense => expense += figure.amount,
            }
            if let Some(hours) = figure.hours {
                total_hours += hours;
            }
        }

        let net_profit = revenue - expense;
        let (hourly_rate, roi) = Self::efficiency(net_profit, expense, total_hours);

        SummaryMetrics {
            revenue,
            expense,
            net_profit,
            total_hours,
            hourly_rate,
            roi,
        }
    }

    /// Builds the zero-filled monthly series for the given month keys.
    ///
    /// Months absent from `sums` become all-zero buckets, so consumers
    /// always receive one entry per key, in key order.
    #[must_use]
    pub fn monthly_stats(months: &[String], sums: &[MonthlySums]) -> Vec<MonthlyStat> {
        let by_month: HashMap<&str, &MonthlySums> =
            sums.iter().map(|row| (row.month.as_str(), row)).collect();

        months
            .iter()
            .map(|key| {
                by_month.get(key.as_str()).map_or_else(
                    || MonthlyStat {
                        month: key.clone(),
                        revenue: Decimal::ZERO,
                        expense: Decimal::ZERO,
                        net_profit: Decimal::ZERO,
                    },
                    |row| MonthlyStat {
                        month: key.clone(),
                        revenue: row.revenue,
                        expense: row.expense,
                        net_profit: row.revenue - row.expense,
                    },
                )
            })
            .collect()
    }

    /// Ranks sources by net profit, descending. Ties keep the input order
    /// (the sort is stable).
    #[must_use]
    pub fn rank_sources(rows: Vec<SourceSums>) -> Vec<SourcePerformance> {
        let mut ranked: Vec<SourcePerformance> = rows
            .into_iter()
            .map(|row| {
                let net_profit = row.revenue - row.expense;
                let (hourly_rate, roi) = Self::efficiency(net_profit, row.expense, row.total_hours);
                SourcePerformance {
                    source_id: row.source_id,
                    name: row.name,
                    net_profit,
                    total_revenue: row.revenue,
                    total_expense: row.expense,
                    total_hours: row.total_hours,
                    roi,
                    hourly_rate,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.net_profit.cmp(&a.net_profit));
        ranked
    }

    /// Computes each source's share of total revenue.
    ///
    /// Shares are rounded independently per source and not renormalized,
    /// so the column may not sum to exactly 100.0. A zero total yields a
    /// zero share for every source.
    #[must_use]
    pub fn portfolio(rows: Vec<SourceRevenue>) -> Vec<PortfolioItem> {
        let total_revenue: Decimal = rows.iter().map(|row| row.revenue).sum();

        rows.into_iter()
            .map(|row| PortfolioItem {
                source_id: row.source_id,
                name: row.name,
                percentage: percent_of(row.revenue, total_revenue)
                    .map_or(Decimal::ZERO, round_tenth),
                revenue: row.revenue,
            })
            .collect()
    }

    /// Expands the top sources into one row per month bucket.
    ///
    /// Sources appear in the given (revenue-ranked) order, each with every
    /// month key zero-filled; sources beyond the top list are omitted
    /// entirely rather than pooled into an "other" row.
    #[must_use]
    pub fn monthly_revenue_by_source(
        months: &[String],
        tops: &[SourceRevenue],
        monthly: &[SourceMonthSum],
    ) -> Vec<SourceMonthlyRevenue> {
        let by_source_month: HashMap<(SourceId, &str), Decimal> = monthly
            .iter()
            .map(|row| ((row.source_id, row.month.as_str()), row.revenue))
            .collect();

        let by_source_month = &by_source_month;
        tops.iter()
            .flat_map(|top| {
                months.iter().map(move |key| SourceMonthlyRevenue {
                    month: key.clone(),
                    source_id: top.source_id,
                    source_name: top.name.clone(),
                    revenue: by_source_month
                        .get(&(top.source_id, key.as_str()))
                        .copied()
                        .unwrap_or(Decimal::ZERO),
                })
            })
            .collect()
    }

    /// Hourly rate and ROI under the zero-divisor policy: a zero divisor
    /// yields a zero metric, never a panic, NaN, or infinity.
    fn efficiency(
        net_profit: Decimal,
        expense: Decimal,
        total_hours: Decimal,
    ) -> (Decimal, Decimal) {
        let hourly_rate = safe_div(net_profit, total_hours).map_or(Decimal::ZERO, round_whole);
        let roi = percent_of(net_profit, expense).map_or(Decimal::ZERO, round_tenth);
        (hourly_rate, roi)
    }
}
