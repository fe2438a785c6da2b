//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod income_source;
pub mod report;
pub mod transaction;

#[cfg(test)]
mod report_tests;

pub use income_source::{
    CreateIncomeSourceInput, IncomeSourceRepository, SourceError, UpdateIncomeSourceInput,
};
pub use report::{ReportError, ReportRepository};
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionRepository, UpdateTransactionInput,
};
