//! Database enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use sideline_core::reports::TransactionKind;

/// Income source category (`source_type` enum in Postgres).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "source_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    /// Freelance client work.
    #[sea_orm(string_value = "FREELANCE")]
    Freelance,
    /// A side project.
    #[sea_orm(string_value = "PROJECT")]
    Project,
    /// Passive income (ads, royalties, interest).
    #[sea_orm(string_value = "PASSIVE")]
    Passive,
    /// Anything else.
    #[sea_orm(string_value = "ETC")]
    Etc,
}

/// Transaction direction (`transaction_type` enum in Postgres).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money earned.
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    /// Money spent.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

impl From<TransactionType> for TransactionKind {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Revenue => Self::Revenue,
            TransactionType::Expense => Self::Expense,
        }
    }
}
