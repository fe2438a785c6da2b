//! Income source repository for CRUD operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::{income_sources, sea_orm_active_enums::SourceType};

/// Longest allowed source name.
pub const MAX_NAME_LEN: usize = 100;

/// Error types for income source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Source not found.
    #[error("Income source not found: {0}")]
    NotFound(Uuid),

    /// Invalid field value.
    #[error("Invalid income source: {0}")]
    Invalid(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an income source.
#[derive(Debug, Clone)]
pub struct CreateIncomeSourceInput {
    /// Source name (non-empty, at most `MAX_NAME_LEN` characters).
    pub name: String,
    /// Source category.
    pub source_type: SourceType,
    /// Free-text description.
    pub description: Option<String>,
}

/// Input for updating an income source.
///
/// Every field is optional; only fields that are present are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateIncomeSourceInput {
    /// Source name.
    pub name: Option<String>,
    /// Source category.
    pub source_type: Option<SourceType>,
    /// Free-text description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// Active flag; inactive sources are archived and drop out of
    /// aggregate reports.
    pub is_active: Option<bool>,
}

/// Income source repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct IncomeSourceRepository {
    db: DatabaseConnection,
}

impl IncomeSourceRepository {
    /// Creates a new income source repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new income source.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or the insert fails.
    pub async fn create(
        &self,
        input: CreateIncomeSourceInput,
    ) -> Result<income_sources::Model, SourceError> {
        validate_name(&input.name)?;

        let now = chrono::Utc::now().into();
        let source = income_sources::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            source_type: Set(input.source_type),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(source.insert(&self.db).await?)
    }

    /// Lists all sources, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<income_sources::Model>, SourceError> {
        Ok(income_sources::Entity::find()
            .order_by_desc(income_sources::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Fetches a source by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no source has this id.
    pub async fn get(&self, id: Uuid) -> Result<income_sources::Model, SourceError> {
        income_sources::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SourceError::NotFound(id))
    }

    /// Applies a partial update, field by field.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no source has this id, or a validation error
    /// for an invalid field value.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateIncomeSourceInput,
    ) -> Result<income_sources::Model, SourceError> {
        let source = self.get(id).await?;
        let mut active: income_sources::ActiveModel = source.into();

        if let Some(name) = input.name {
            validate_name(&name)?;
            active.name = Set(name);
        }
        if let Some(source_type) = input.source_type {
            active.source_type = Set(source_type);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a source; its transactions go with it (FK cascade).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no source has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), SourceError> {
        let result = income_sources::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(SourceError::NotFound(id));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), SourceError> {
    if name.trim().is_empty() {
        return Err(SourceError::Invalid("name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(SourceError::Invalid(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_rejects_empty_and_blank() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_rejects_overlong() {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_name(&name).is_err());
        let name = "x".repeat(MAX_NAME_LEN);
        assert!(validate_name(&name).is_ok());
    }
}
