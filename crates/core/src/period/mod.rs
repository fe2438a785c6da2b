//! Calendar month bucketing and report window resolution.
//!
//! Every report is scoped to an inclusive `[start, end]` date window and
//! bucketed by calendar month. This module resolves the caller-facing
//! filter parameters into a concrete window and generates the contiguous
//! month keys the zero-filling calculators consume.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from report window resolution.
#[derive(Debug, Error)]
pub enum PeriodError {
    /// Start date after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A value that does not name a calendar date or month.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Only one bound of an explicit date range was provided.
    #[error("Incomplete date range: startDate and endDate must be given together")]
    IncompleteRange,
}

/// Caller-facing filter parameters for window-scoped reports.
///
/// Precedence during resolution: explicit `start_date` + `end_date`, then
/// `limit` (recent N months), then `year` (optionally narrowed to `month`),
/// then the operation's default.
#[derive(Debug, Clone, Default)]
pub struct WindowQuery {
    /// Explicit window start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Explicit window end, `YYYY-MM-DD` (inclusive).
    pub end_date: Option<String>,
    /// Recent N months including the current one.
    pub limit: Option<u32>,
    /// Calendar year.
    pub year: Option<i32>,
    /// Calendar month (1-12); narrows `year`, or the current year if
    /// `year` is absent.
    pub month: Option<u32>,
}

/// Default window applied when no filter parameter is given.
#[derive(Debug, Clone, Copy)]
pub enum WindowDefault {
    /// Current calendar year.
    CurrentYear,
    /// Last N months including the current month.
    RecentMonths(u32),
}

/// An inclusive date window for report queries.
///
/// Dates are day-granular; the end bound is inclusive by date-only `<=`
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    /// First day covered.
    pub start: NaiveDate,
    /// Last day covered.
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses an explicit `YYYY-MM-DD` pair into a window.
    pub fn parse(start: &str, end: &str) -> Result<Self, PeriodError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// The whole calendar year `year`.
    pub fn calendar_year(year: i32) -> Result<Self, PeriodError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| PeriodError::InvalidDate(format!("{year:04}")))?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| PeriodError::InvalidDate(format!("{year:04}")))?;
        Ok(Self { start, end })
    }

    /// The whole calendar month `year`-`month`.
    pub fn calendar_month(year: i32, month: u32) -> Result<Self, PeriodError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PeriodError::InvalidDate(format!("{year:04}-{month:02}")))?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| PeriodError::InvalidDate(format!("{year:04}-{month:02}")))?;
        Ok(Self { start, end })
    }

    /// The last `months` calendar months including the current one:
    /// from the first day of the month `months - 1` months before `today`,
    /// up to `today`.
    #[must_use]
    pub fn last_months(months: u32, today: NaiveDate) -> Self {
        let span = months.max(1) - 1;
        // Month arithmetic cannot fail for in-range dates.
        let start = today
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(span)))
            .unwrap_or(today);
        Self { start, end: today }
    }

    /// Resolves filter parameters into a window, with the precedence
    /// documented on [`WindowQuery`].
    pub fn resolve(
        query: &WindowQuery,
        today: NaiveDate,
        default: WindowDefault,
    ) -> Result<Self, PeriodError> {
        match (query.start_date.as_deref(), query.end_date.as_deref()) {
            (Some(start), Some(end)) => return Self::parse(start, end),
            (Some(_), None) | (None, Some(_)) => return Err(PeriodError::IncompleteRange),
            (None, None) => {}
        }
        if let Some(limit) = query.limit {
            return Ok(Self::last_months(limit, today));
        }
        if let Some(month) = query.month {
            return Self::calendar_month(query.year.unwrap_or_else(|| today.year()), month);
        }
        if let Some(year) = query.year {
            return Self::calendar_year(year);
        }
        match default {
            WindowDefault::CurrentYear => Self::calendar_year(today.year()),
            WindowDefault::RecentMonths(months) => Ok(Self::last_months(months, today)),
        }
    }

    /// Ordered `"YYYY-MM"` keys covering every month the window touches.
    /// A same-month window yields exactly one key.
    #[must_use]
    pub fn month_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        let (mut year, mut month) = (self.start.year(), self.start.month());
        let last = (self.end.year(), self.end.month());
        while (year, month) <= last {
            keys.push(format!("{year:04}-{month:02}"));
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        keys
    }
}

/// Formats a date's month as a `"YYYY-MM"` key.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Previous calendar month, wrapping January into December of the prior year.
#[must_use]
pub const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn parse_date(value: &str) -> Result<NaiveDate, PeriodError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| PeriodError::InvalidDate(value.to_string()))
}
