//! Report repository: the grouped-sum query surface behind the reporting
//! calculators.
//!
//! Every method fetches the matching transactions and folds them into
//! exact `Decimal` aggregates. Gap-filling, ranking, and rounding belong
//! to the calculators in `sideline-core`; a failed query fails the whole
//! report, with no retry and no partial result.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use sideline_core::period::{ReportWindow, month_key};
use sideline_core::reports::{
    MonthlySums, PeriodSums, SourceMonthSum, SourceRevenue, SourceSums, TransactionFigures,
};
use sideline_shared::types::SourceId;

use crate::entities::{income_sources, sea_orm_active_enums::TransactionType, transactions};

/// Error types for report queries.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Source not found.
    #[error("Income source not found: {0}")]
    SourceNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository for grouped-sum queries over transactions.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Month-bucketed revenue/expense sums within the window.
    ///
    /// Only months present in the data are returned, in chronological
    /// order. `source_id` narrows to a single source's transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn sum_by_month(
        &self,
        window: ReportWindow,
        source_id: Option<Uuid>,
        active_only: bool,
    ) -> Result<Vec<MonthlySums>, ReportError> {
        let rows = self
            .fetch_window(Some(window), source_id, active_only)
            .await?;
        Ok(fold_monthly(&rows))
    }

    /// Aggregate revenue/expense/hours sums over a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn sum_by_period(
        &self,
        window: Option<ReportWindow>,
        source_id: Option<Uuid>,
        active_only: bool,
    ) -> Result<PeriodSums, ReportError> {
        let rows = self.fetch_window(window, source_id, active_only).await?;
        Ok(fold_period(&rows))
    }

    /// Per-source sums over the window: one row per active source, in
    /// creation order, zero-valued when the source had no activity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn sum_by_source(
        &self,
        window: Option<ReportWindow>,
    ) -> Result<Vec<SourceSums>, ReportError> {
        let sources = self.active_sources().await?;
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let source_ids: Vec<Uuid> = sources.iter().map(|source| source.id).collect();
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::SourceId.is_in(source_ids));
        if let Some(window) = window {
            query = query
                .filter(transactions::Column::Date.gte(window.start))
                .filter(transactions::Column::Date.lte(window.end));
        }
        let rows = query.all(&self.db).await?;

        Ok(fold_by_source(&sources, &rows))
    }

    /// Top `limit` active sources by revenue within the window,
    /// descending. Sources without revenue in the window do not rank.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn top_revenue_sources(
        &self,
        window: ReportWindow,
        limit: usize,
    ) -> Result<Vec<SourceRevenue>, ReportError> {
        let sums = self.sum_by_source(Some(window)).await?;

        let mut tops: Vec<SourceRevenue> = sums
            .into_iter()
            .filter(|row| row.revenue > Decimal::ZERO)
            .map(|row| SourceRevenue {
                source_id: row.source_id,
                name: row.name,
                revenue: row.revenue,
            })
            .collect();
        tops.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        tops.truncate(limit);

        Ok(tops)
    }

    /// Per-source, per-month revenue sums for the given sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn revenue_by_source_month(
        &self,
        window: ReportWindow,
        source_ids: &[Uuid],
    ) -> Result<Vec<SourceMonthSum>, ReportError> {
        if source_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = transactions::Entity::find()
            .filter(transactions::Column::SourceId.is_in(source_ids.to_vec()))
            .filter(transactions::Column::TransactionType.eq(TransactionType::Revenue))
            .filter(transactions::Column::Date.gte(window.start))
            .filter(transactions::Column::Date.lte(window.end))
            .all(&self.db)
            .await?;

        Ok(fold_source_month_revenue(&rows))
    }

    /// Raw figures of one source's transactions, optionally narrowed to a
    /// window, for the single-source summary.
    ///
    /// # Errors
    ///
    /// Returns `SourceNotFound` for an unknown source id, or an error if
    /// the query fails.
    pub async fn raw_transactions(
        &self,
        source_id: Uuid,
        window: Option<ReportWindow>,
    ) -> Result<Vec<TransactionFigures>, ReportError> {
        income_sources::Entity::find_by_id(source_id)
            .one(&self.db)
            .await?
            .ok_or(ReportError::SourceNotFound(source_id))?;

        let rows = self.fetch_window(window, Some(source_id), false).await?;
        Ok(rows.iter().map(to_figures).collect())
    }

    async fn active_sources(&self) -> Result<Vec<income_sources::Model>, ReportError> {
        Ok(income_sources::Entity::find()
            .filter(income_sources::Column::IsActive.eq(true))
            .order_by_asc(income_sources::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn fetch_window(
        &self,
        window: Option<ReportWindow>,
        source_id: Option<Uuid>,
        active_only: bool,
    ) -> Result<Vec<transactions::Model>, ReportError> {
        let mut query = transactions::Entity::find();
        if let Some(window) = window {
            query = query
                .filter(transactions::Column::Date.gte(window.start))
                .filter(transactions::Column::Date.lte(window.end));
        }
        if let Some(source_id) = source_id {
            query = query.filter(transactions::Column::SourceId.eq(source_id));
        }
        if active_only {
            let sources = self.active_sources().await?;
            if sources.is_empty() {
                return Ok(Vec::new());
            }
            let active_ids: Vec<Uuid> = sources.iter().map(|source| source.id).collect();
            query = query.filter(transactions::Column::SourceId.is_in(active_ids));
        }
        Ok(query.all(&self.db).await?)
    }
}

// ============================================================================
// Pure folds over fetched rows
// ============================================================================

/// Folds transactions into per-month revenue/expense sums, in
/// chronological order.
pub(crate) fn fold_monthly(rows: &[transactions::Model]) -> Vec<MonthlySums> {
    let mut by_month: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for row in rows {
        let entry = by_month
            .entry(month_key(row.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match row.transaction_type {
            TransactionType::Revenue => entry.0 += row.amount,
            TransactionType::Expense => entry.1 += row.amount,
        }
    }

    by_month
        .into_iter()
        .map(|(month, (revenue, expense))| MonthlySums {
            month,
            revenue,
            expense,
        })
        .collect()
}

/// Folds transactions into period totals. Untracked hours contribute
/// nothing.
pub(crate) fn fold_period(rows: &[transactions::Model]) -> PeriodSums {
    let mut sums = PeriodSums::default();

    for row in rows {
        match row.transaction_type {
            TransactionType::Revenue => sums.revenue += row.amount,
            TransactionType::Expense => sums.expense += row.amount,
        }
        if let Some(hours) = row.hours {
            sums.total_hours += hours;
        }
    }

    sums
}

/// Folds transactions into one row per source, keeping the given source
/// order.
pub(crate) fn fold_by_source(
    sources: &[income_sources::Model],
    rows: &[transactions::Model],
) -> Vec<SourceSums> {
    let mut totals: HashMap<Uuid, (Decimal, Decimal, Decimal)> = HashMap::new();

    for row in rows {
        let entry = totals
            .entry(row.source_id)
            .or_insert((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
        match row.transaction_type {
            TransactionType::Revenue => entry.0 += row.amount,
            TransactionType::Expense => entry.1 += row.amount,
        }
        if let Some(hours) = row.hours {
            entry.2 += hours;
        }
    }

    sources
        .iter()
        .map(|source| {
            let (revenue, expense, total_hours) = totals
                .get(&source.id)
                .copied()
                .unwrap_or((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
            SourceSums {
                source_id: SourceId::from_uuid(source.id),
                name: source.name.clone(),
                revenue,
                expense,
                total_hours,
            }
        })
        .collect()
}

/// Folds revenue transactions into per-source, per-month sums.
pub(crate) fn fold_source_month_revenue(rows: &[transactions::Model]) -> Vec<SourceMonthSum> {
    let mut by_pair: BTreeMap<(Uuid, String), Decimal> = BTreeMap::new();

    for row in rows {
        if row.transaction_type != TransactionType::Revenue {
            continue;
        }
        *by_pair
            .entry((row.source_id, month_key(row.date)))
            .or_insert(Decimal::ZERO) += row.amount;
    }

    by_pair
        .into_iter()
        .map(|((source_id, month), revenue)| SourceMonthSum {
            source_id: SourceId::from_uuid(source_id),
            month,
            revenue,
        })
        .collect()
}

/// Maps an entity row to the calculator input figures.
pub(crate) fn to_figures(row: &transactions::Model) -> TransactionFigures {
    TransactionFigures {
        kind: row.transaction_type.into(),
        amount: row.amount,
        hours: row.hours,
    }
}
