//! Dashboard report routes.
//!
//! The reporting façade: each endpoint resolves its filter parameters to
//! a concrete window, issues grouped-sum queries, runs the calculators,
//! and returns the fully computed, zero-filled, rounded structures -
//! never raw query rows. All endpoints are read-only projections.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::routes::error_response;
use crate::routes::income_sources::{period_error, report_error};
use sideline_core::dashboard::DashboardService;
use sideline_core::period::{ReportWindow, WindowDefault, WindowQuery, previous_month};
use sideline_core::reports::{ReportService, SourceRevenue};
use sideline_db::repositories::report::ReportRepository;

/// How many sources the revenue breakdown keeps. Sources beyond the top
/// five are omitted, not pooled into an "other" row.
const TOP_SOURCES: usize = 5;

/// Default span of the revenue-by-source view, in months.
const DEFAULT_TREND_MONTHS: u32 = 6;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/summary", get(get_summary))
        .route("/dashboard/portfolio", get(get_portfolio))
        .route("/dashboard/monthly-stats", get(get_monthly_stats))
        .route("/dashboard/source-ranking", get(get_source_ranking))
        .route(
            "/dashboard/monthly-revenue-by-source",
            get(get_monthly_revenue_by_source),
        )
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the month-over-month summary.
#[derive(Debug, Deserialize)]
pub struct TargetMonthQuery {
    /// Calendar year (default: current).
    pub year: Option<i32>,
    /// Calendar month 1-12 (default: current).
    pub month: Option<u32>,
}

/// Query parameters for the monthly trend series.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatsQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Recent N months including the current one (wins over `year`).
    pub limit: Option<u32>,
    /// Explicit window start, `YYYY-MM-DD` (wins over `limit`).
    pub start_date: Option<String>,
    /// Explicit window end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// Query parameters for the source ranking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingQuery {
    /// Calendar year.
    pub year: Option<i32>,
    /// Calendar month 1-12.
    pub month: Option<u32>,
    /// Explicit window start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Explicit window end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// Query parameters for the revenue-by-source breakdown.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBySourceQuery {
    /// Recent N months including the current one.
    pub limit: Option<u32>,
    /// Explicit window start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Explicit window end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/dashboard/summary` - Target month vs previous month, with change
/// rates.
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<TargetMonthQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let (year, month) = target_month(query.year, query.month, today);

    let current_window = match ReportWindow::calendar_month(year, month) {
        Ok(window) => window,
        Err(e) => return error_response(&period_error(&e)),
    };
    let (prev_year, prev_month) = previous_month(year, month);
    let previous_window = match ReportWindow::calendar_month(prev_year, prev_month) {
        Ok(window) => window,
        Err(e) => return error_response(&period_error(&e)),
    };

    let repo = ReportRepository::new((*state.db).clone());

    // The two month aggregates are independent; query them concurrently
    // and combine only after both complete.
    match tokio::try_join!(
        repo.sum_by_period(Some(current_window), None, true),
        repo.sum_by_period(Some(previous_window), None, true),
    ) {
        Ok((current, previous)) => (
            StatusCode::OK,
            Json(DashboardService::summarize(&current, &previous)),
        )
            .into_response(),
        Err(e) => error_response(&report_error(e)),
    }
}

/// GET `/dashboard/portfolio` - Revenue share per active source.
async fn get_portfolio(
    State(state): State<AppState>,
    Query(query): Query<TargetMonthQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let window_query = WindowQuery {
        year: query.year,
        month: query.month,
        ..WindowQuery::default()
    };
    let window = match ReportWindow::resolve(&window_query, today, WindowDefault::CurrentYear) {
        Ok(window) => window,
        Err(e) => return error_response(&period_error(&e)),
    };

    let repo = ReportRepository::new((*state.db).clone());
    match repo.sum_by_source(Some(window)).await {
        Ok(sums) => {
            let revenues: Vec<SourceRevenue> = sums
                .into_iter()
                .map(|row| SourceRevenue {
                    source_id: row.source_id,
                    name: row.name,
                    revenue: row.revenue,
                })
                .collect();
            (StatusCode::OK, Json(ReportService::portfolio(revenues))).into_response()
        }
        Err(e) => error_response(&report_error(e)),
    }
}

/// GET `/dashboard/monthly-stats` - Zero-filled monthly trend over active
/// sources (default: current calendar year).
async fn get_monthly_stats(
    State(state): State<AppState>,
    Query(query): Query<MonthlyStatsQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let window_query = WindowQuery {
        start_date: query.start_date,
        end_date: query.end_date,
        limit: query.limit,
        year: query.year,
        month: None,
    };
    let window = match ReportWindow::resolve(&window_query, today, WindowDefault::CurrentYear) {
        Ok(window) => window,
        Err(e) => return error_response(&period_error(&e)),
    };

    let repo = ReportRepository::new((*state.db).clone());
    match repo.sum_by_month(window, None, true).await {
        Ok(sums) => {
            let stats = ReportService::monthly_stats(&window.month_keys(), &sums);
            (StatusCode::OK, Json(stats)).into_response()
        }
        Err(e) => error_response(&report_error(e)),
    }
}

/// GET `/dashboard/source-ranking` - Active sources ranked by net profit.
async fn get_source_ranking(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let window_query = WindowQuery {
        start_date: query.start_date,
        end_date: query.end_date,
        limit: None,
        year: query.year,
        month: query.month,
    };
    let window = match ReportWindow::resolve(&window_query, today, WindowDefault::CurrentYear) {
        Ok(window) => window,
        Err(e) => return error_response(&period_error(&e)),
    };

    let repo = ReportRepository::new((*state.db).clone());
    match repo.sum_by_source(Some(window)).await {
        Ok(sums) => {
            (StatusCode::OK, Json(ReportService::rank_sources(sums))).into_response()
        }
        Err(e) => error_response(&report_error(e)),
    }
}

/// GET `/dashboard/monthly-revenue-by-source` - Monthly revenue of the
/// top five sources, zero-filled per month (default: recent 6 months).
async fn get_monthly_revenue_by_source(
    State(state): State<AppState>,
    Query(query): Query<RevenueBySourceQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let window_query = WindowQuery {
        start_date: query.start_date,
        end_date: query.end_date,
        limit: query.limit,
        ..WindowQuery::default()
    };
    let window = match ReportWindow::resolve(
        &window_query,
        today,
        WindowDefault::RecentMonths(DEFAULT_TREND_MONTHS),
    ) {
        Ok(window) => window,
        Err(e) => return error_response(&period_error(&e)),
    };

    let repo = ReportRepository::new((*state.db).clone());

    let tops = match repo.top_revenue_sources(window, TOP_SOURCES).await {
        Ok(tops) => tops,
        Err(e) => return error_response(&report_error(e)),
    };
    let source_ids: Vec<Uuid> = tops.iter().map(|top| top.source_id.into_inner()).collect();

    match repo.revenue_by_source_month(window, &source_ids).await {
        Ok(monthly) => {
            let rows =
                ReportService::monthly_revenue_by_source(&window.month_keys(), &tops, &monthly);
            (StatusCode::OK, Json(rows)).into_response()
        }
        Err(e) => error_response(&report_error(e)),
    }
}

/// Resolves the dashboard target month, defaulting either part to today.
fn target_month(year: Option<i32>, month: Option<u32>, today: NaiveDate) -> (i32, u32) {
    (
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| today.month()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[rstest]
    #[case::defaults(None, None, (2026, 8))]
    #[case::explicit(Some(2025), Some(2), (2025, 2))]
    #[case::year_only(Some(2025), None, (2025, 8))]
    #[case::month_only(None, Some(1), (2026, 1))]
    fn test_target_month(
        #[case] year: Option<i32>,
        #[case] month: Option<u32>,
        #[case] expected: (i32, u32),
    ) {
        assert_eq!(target_month(year, month, today()), expected);
    }
}
