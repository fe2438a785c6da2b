//! Decimal helpers for monetary and time-tracking math.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every accumulation, ratio, and rounding step in the reporting engine
//! goes through `rust_decimal::Decimal` and the helpers below, so the
//! zero-divisor policy lives in exactly one place.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to a whole number, midpoint away from zero.
#[must_use]
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to one decimal place, midpoint away from zero.
#[must_use]
pub fn round_tenth(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Division that never panics: `None` when the divisor is zero.
///
/// Callers decide what a zero divisor means; the reporting calculators
/// map it to a zero metric.
#[must_use]
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator.is_zero() {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Percentage share of `part` in `whole`: `None` when `whole` is zero.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    safe_div(part, whole).map(|ratio| ratio * Decimal::ONE_HUNDRED)
}
