//! Transaction repository for CRUD operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{income_sources, sea_orm_active_enums::TransactionType, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Owning source not found.
    #[error("Income source not found: {0}")]
    SourceNotFound(Uuid),

    /// Invalid field value.
    #[error("Invalid transaction: {0}")]
    Invalid(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning income source.
    pub source_id: Uuid,
    /// Revenue or expense.
    pub transaction_type: TransactionType,
    /// Monetary amount (non-negative, two decimal places).
    pub amount: Decimal,
    /// Transaction date (day granularity).
    pub date: NaiveDate,
    /// Free-text description (non-empty).
    pub description: String,
    /// Recurring flag (subscriptions, salaries); informational only.
    pub is_recurring: bool,
    /// Time invested; `None` means not tracked.
    pub hours: Option<Decimal>,
}

/// Input for updating a transaction.
///
/// Every field is optional; only fields that are present are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// Owning income source.
    pub source_id: Option<Uuid>,
    /// Revenue or expense.
    pub transaction_type: Option<TransactionType>,
    /// Monetary amount.
    pub amount: Option<Decimal>,
    /// Transaction date.
    pub date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
    /// Recurring flag.
    pub is_recurring: Option<bool>,
    /// Time invested (`Some(None)` clears the tracking).
    pub hours: Option<Option<Decimal>>,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction after validating its fields and the owning
    /// source.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is invalid, the source does not exist,
    /// or the insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        validate_amount(input.amount)?;
        validate_description(&input.description)?;
        if let Some(hours) = input.hours {
            validate_hours(hours)?;
        }
        self.ensure_source_exists(input.source_id).await?;

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            source_id: Set(input.source_id),
            transaction_type: Set(input.transaction_type),
            amount: Set(input.amount),
            date: Set(input.date),
            description: Set(input.description),
            is_recurring: Set(input.is_recurring),
            hours: Set(input.hours),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(transaction.insert(&self.db).await?)
    }

    /// Lists all transactions, most recent date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<transactions::Model>, TransactionError> {
        Ok(transactions::Entity::find()
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Lists one source's transactions, most recent date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_by_source(
        &self,
        source_id: Uuid,
    ) -> Result<Vec<transactions::Model>, TransactionError> {
        Ok(transactions::Entity::find()
            .filter(transactions::Column::SourceId.eq(source_id))
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Fetches a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no transaction has this id.
    pub async fn get(&self, id: Uuid) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Applies a partial update, field by field.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no transaction has this id, or a validation
    /// error for an invalid field value.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction = self.get(id).await?;
        let mut active: transactions::ActiveModel = transaction.into();

        if let Some(source_id) = input.source_id {
            self.ensure_source_exists(source_id).await?;
            active.source_id = Set(source_id);
        }
        if let Some(transaction_type) = input.transaction_type {
            active.transaction_type = Set(transaction_type);
        }
        if let Some(amount) = input.amount {
            validate_amount(amount)?;
            active.amount = Set(amount);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(description) = input.description {
            validate_description(&description)?;
            active.description = Set(description);
        }
        if let Some(is_recurring) = input.is_recurring {
            active.is_recurring = Set(is_recurring);
        }
        if let Some(hours) = input.hours {
            if let Some(value) = hours {
                validate_hours(value)?;
            }
            active.hours = Set(hours);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no transaction has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }
        Ok(())
    }

    async fn ensure_source_exists(&self, source_id: Uuid) -> Result<(), TransactionError> {
        income_sources::Entity::find_by_id(source_id)
            .one(&self.db)
            .await?
            .map(|_| ())
            .ok_or(TransactionError::SourceNotFound(source_id))
    }
}

// ============================================================================
// Field validation
// ============================================================================

/// Largest storable amount: NUMERIC(12, 2).
fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999_999, 2)
}

/// Validates a monetary amount: non-negative and within NUMERIC(12, 2).
pub fn validate_amount(amount: Decimal) -> Result<(), TransactionError> {
    if amount < Decimal::ZERO {
        return Err(TransactionError::Invalid(
            "amount must not be negative".into(),
        ));
    }
    if amount > max_amount() {
        return Err(TransactionError::Invalid(format!(
            "amount must be at most {}",
            max_amount()
        )));
    }
    Ok(())
}

/// Validates tracked hours: non-negative.
pub fn validate_hours(hours: Decimal) -> Result<(), TransactionError> {
    if hours < Decimal::ZERO {
        return Err(TransactionError::Invalid(
            "hours must not be negative".into(),
        ));
    }
    Ok(())
}

/// Validates the description: non-empty.
pub fn validate_description(description: &str) -> Result<(), TransactionError> {
    if description.trim().is_empty() {
        return Err(TransactionError::Invalid(
            "description must not be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amount_bounds() {
        assert!(validate_amount(Decimal::ZERO).is_ok());
        assert!(validate_amount(dec!(99999999999.99)).is_ok());
        assert!(validate_amount(dec!(-0.01)).is_err());
        assert!(validate_amount(dec!(100000000000.00)).is_err());
    }

    #[test]
    fn test_validate_hours() {
        assert!(validate_hours(Decimal::ZERO).is_ok());
        assert!(validate_hours(dec!(2.5)).is_ok());
        assert!(validate_hours(dec!(-1)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("October ad revenue").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description("  ").is_err());
    }
}
