//! Income source management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::routes::error_response;
use crate::routes::transactions::TransactionResponse;
use sideline_core::period::{PeriodError, ReportWindow, WindowDefault, WindowQuery};
use sideline_core::reports::ReportService;
use sideline_db::entities::{income_sources, sea_orm_active_enums::SourceType};
use sideline_db::repositories::income_source::{
    CreateIncomeSourceInput, IncomeSourceRepository, SourceError, UpdateIncomeSourceInput,
};
use sideline_db::repositories::report::{ReportError, ReportRepository};
use sideline_db::repositories::transaction::TransactionRepository;
use sideline_shared::AppError;
use sideline_shared::types::SourceId;

/// Creates the income source routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/income-sources", post(create_source))
        .route("/income-sources", get(list_sources))
        .route("/income-sources/{id}", get(get_source))
        .route("/income-sources/{id}", patch(update_source))
        .route("/income-sources/{id}", delete(delete_source))
        .route("/income-sources/{id}/transactions", get(list_source_transactions))
        .route("/income-sources/{id}/summary", get(get_source_summary))
        .route("/income-sources/{id}/monthly-stats", get(get_source_monthly_stats))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating an income source.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceRequest {
    /// Source name.
    pub name: String,
    /// Source category.
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: SourceType,
    /// Free-text description.
    pub description: Option<String>,
}

const fn default_source_type() -> SourceType {
    SourceType::Etc
}

/// Request body for updating an income source.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceRequest {
    /// Source name.
    pub name: Option<String>,
    /// Source category.
    #[serde(rename = "type")]
    pub source_type: Option<SourceType>,
    /// Free-text description.
    pub description: Option<String>,
    /// Active flag; setting it to false archives the source.
    pub is_active: Option<bool>,
}

/// Query parameters for the per-source summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Calendar year filter.
    pub year: Option<i32>,
    /// Calendar month filter (1-12).
    pub month: Option<u32>,
}

/// Query parameters for the per-source monthly series.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMonthlyStatsQuery {
    /// Recent N months including the current one.
    pub limit: Option<u32>,
    /// Explicit window start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Explicit window end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// Response for an income source.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResponse {
    /// Source ID.
    pub id: SourceId,
    /// Source name.
    pub name: String,
    /// Source category.
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Free-text description.
    pub description: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<income_sources::Model> for SourceResponse {
    fn from(model: income_sources::Model) -> Self {
        Self {
            id: SourceId::from_uuid(model.id),
            name: model.name,
            source_type: model.source_type,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Error mapping
// ============================================================================

pub(crate) fn source_error(error: SourceError) -> AppError {
    match error {
        SourceError::NotFound(id) => AppError::NotFound(format!("income source {id}")),
        SourceError::Invalid(message) => AppError::Validation(message),
        SourceError::Database(db_error) => {
            error!(error = %db_error, "Income source query failed");
            AppError::Database(db_error.to_string())
        }
    }
}

pub(crate) fn report_error(error: ReportError) -> AppError {
    match error {
        ReportError::SourceNotFound(id) => AppError::NotFound(format!("income source {id}")),
        ReportError::Database(db_error) => {
            error!(error = %db_error, "Report query failed");
            AppError::Database(db_error.to_string())
        }
    }
}

pub(crate) fn period_error(error: &PeriodError) -> AppError {
    AppError::Validation(error.to_string())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/income-sources` - Create an income source.
async fn create_source(
    State(state): State<AppState>,
    Json(request): Json<CreateSourceRequest>,
) -> impl IntoResponse {
    let repo = IncomeSourceRepository::new((*state.db).clone());

    match repo
        .create(CreateIncomeSourceInput {
            name: request.name,
            source_type: request.source_type,
            description: request.description,
        })
        .await
    {
        Ok(source) => {
            (StatusCode::CREATED, Json(SourceResponse::from(source))).into_response()
        }
        Err(e) => error_response(&source_error(e)),
    }
}

/// GET `/income-sources` - List all sources, newest first.
async fn list_sources(State(state): State<AppState>) -> impl IntoResponse {
    let repo = IncomeSourceRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(sources) => {
            let response: Vec<SourceResponse> =
                sources.into_iter().map(SourceResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&source_error(e)),
    }
}

/// GET `/income-sources/{id}` - Fetch one source.
async fn get_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = IncomeSourceRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(source) => (StatusCode::OK, Json(SourceResponse::from(source))).into_response(),
        Err(e) => error_response(&source_error(e)),
    }
}

/// PATCH `/income-sources/{id}` - Partially update a source.
async fn update_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSourceRequest>,
) -> impl IntoResponse {
    let repo = IncomeSourceRepository::new((*state.db).clone());

    let input = UpdateIncomeSourceInput {
        name: request.name,
        source_type: request.source_type,
        description: request.description.map(Some),
        is_active: request.is_active,
    };

    match repo.update(id, input).await {
        Ok(source) => (StatusCode::OK, Json(SourceResponse::from(source))).into_response(),
        Err(e) => error_response(&source_error(e)),
    }
}

/// DELETE `/income-sources/{id}` - Delete a source and, via cascade, its
/// transactions.
async fn delete_source(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = IncomeSourceRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&source_error(e)),
    }
}

/// GET `/income-sources/{id}/transactions` - List one source's
/// transactions.
async fn list_source_transactions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.list_by_source(id).await {
        Ok(rows) => {
            let response: Vec<TransactionResponse> =
                rows.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&crate::routes::transactions::transaction_error(e)),
    }
}

/// GET `/income-sources/{id}/summary` - Summary metrics for one source.
///
/// Covers the whole history unless a year (and optionally month) filter
/// is given.
async fn get_source_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let window = match (query.year, query.month) {
        (None, None) => None,
        (year, Some(month)) => {
            match ReportWindow::calendar_month(year.unwrap_or_else(|| today.year()), month) {
                Ok(window) => Some(window),
                Err(e) => return error_response(&period_error(&e)),
            }
        }
        (Some(year), None) => match ReportWindow::calendar_year(year) {
            Ok(window) => Some(window),
            Err(e) => return error_response(&period_error(&e)),
        },
    };

    let repo = ReportRepository::new((*state.db).clone());
    match repo.raw_transactions(id, window).await {
        Ok(figures) => {
            (StatusCode::OK, Json(ReportService::summarize(&figures))).into_response()
        }
        Err(e) => error_response(&report_error(e)),
    }
}

/// GET `/income-sources/{id}/monthly-stats` - Zero-filled monthly series
/// for one source (default: recent 6 months).
async fn get_source_monthly_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SourceMonthlyStatsQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let window_query = WindowQuery {
        start_date: query.start_date,
        end_date: query.end_date,
        limit: query.limit,
        ..WindowQuery::default()
    };
    let window =
        match ReportWindow::resolve(&window_query, today, WindowDefault::RecentMonths(6)) {
            Ok(window) => window,
            Err(e) => return error_response(&period_error(&e)),
        };

    let repo = ReportRepository::new((*state.db).clone());
    match repo.sum_by_month(window, Some(id), false).await {
        Ok(sums) => {
            let stats = ReportService::monthly_stats(&window.month_keys(), &sums);
            (StatusCode::OK, Json(stats)).into_response()
        }
        Err(e) => error_response(&report_error(e)),
    }
}
