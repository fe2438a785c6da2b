//! Income reporting calculators.
//!
//! Pure business logic turning dated revenue/expense aggregates into
//! derived metrics:
//! - Single-source summary (net profit, hourly rate, ROI)
//! - Zero-filled monthly trend series
//! - Per-source performance ranking
//! - Portfolio revenue distribution
//! - Top-sources monthly revenue breakdown

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
