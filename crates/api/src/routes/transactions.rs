//! Transaction management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use crate::routes::error_response;
use sideline_db::entities::{sea_orm_active_enums::TransactionType, transactions};
use sideline_db::repositories::transaction::{
    CreateTransactionInput, TransactionError, TransactionRepository, UpdateTransactionInput,
};
use sideline_shared::AppError;
use sideline_shared::types::{SourceId, TransactionId};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions", get(list_transactions))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", patch(update_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Restrict to one source.
    pub source_id: Option<Uuid>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Owning income source.
    pub source_id: Uuid,
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Monetary amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Transaction date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Recurring flag (subscriptions, salaries).
    #[serde(default)]
    pub is_recurring: bool,
    /// Time invested; omit when not tracked.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub hours: Option<Decimal>,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    /// Owning income source.
    pub source_id: Option<Uuid>,
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// Monetary amount.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    /// Transaction date.
    pub date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
    /// Recurring flag.
    pub is_recurring: Option<bool>,
    /// Time invested.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub hours: Option<Decimal>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning income source.
    pub source_id: SourceId,
    /// Revenue or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Monetary amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Transaction date, `YYYY-MM-DD`.
    pub date: String,
    /// Free-text description.
    pub description: String,
    /// Recurring flag.
    pub is_recurring: bool,
    /// Time invested; `null` when not tracked.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub hours: Option<Decimal>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: TransactionId::from_uuid(model.id),
            source_id: SourceId::from_uuid(model.source_id),
            transaction_type: model.transaction_type,
            amount: model.amount,
            date: model.date.format("%Y-%m-%d").to_string(),
            description: model.description,
            is_recurring: model.is_recurring,
            hours: model.hours,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Error mapping
// ============================================================================

pub(crate) fn transaction_error(error: TransactionError) -> AppError {
    match error {
        TransactionError::NotFound(id) => AppError::NotFound(format!("transaction {id}")),
        TransactionError::SourceNotFound(id) => {
            AppError::NotFound(format!("income source {id}"))
        }
        TransactionError::Invalid(message) => AppError::Validation(message),
        TransactionError::Database(db_error) => {
            error!(error = %db_error, "Transaction query failed");
            AppError::Database(db_error.to_string())
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/transactions` - Create a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let input = CreateTransactionInput {
        source_id: request.source_id,
        transaction_type: request.transaction_type,
        amount: request.amount,
        date: request.date,
        description: request.description,
        is_recurring: request.is_recurring,
        hours: request.hours,
    };

    match repo.create(input).await {
        Ok(transaction) => (
            StatusCode::CREATED,
            Json(TransactionResponse::from(transaction)),
        )
            .into_response(),
        Err(e) => error_response(&transaction_error(e)),
    }
}

/// GET `/transactions` - List transactions, optionally for one source.
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let result = match query.source_id {
        Some(source_id) => repo.list_by_source(source_id).await,
        None => repo.list().await,
    };

    match result {
        Ok(rows) => {
            let response: Vec<TransactionResponse> =
                rows.into_iter().map(TransactionResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(&transaction_error(e)),
    }
}

/// GET `/transactions/{id}` - Fetch one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get(id).await {
        Ok(transaction) => {
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Err(e) => error_response(&transaction_error(e)),
    }
}

/// PATCH `/transactions/{id}` - Partially update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    let input = UpdateTransactionInput {
        source_id: request.source_id,
        transaction_type: request.transaction_type,
        amount: request.amount,
        date: request.date,
        description: request.description,
        is_recurring: request.is_recurring,
        hours: request.hours.map(Some),
    };

    match repo.update(id, input).await {
        Ok(transaction) => {
            (StatusCode::OK, Json(TransactionResponse::from(transaction))).into_response()
        }
        Err(e) => error_response(&transaction_error(e)),
    }
}

/// DELETE `/transactions/{id}` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&transaction_error(e)),
    }
}
