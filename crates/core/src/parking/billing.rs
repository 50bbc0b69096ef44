//! Billing calculator.
//!
//! Cost is a step function of elapsed time: every started hour is billed in
//! full, and a session that has just started already owes one hour.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::parking_errors::ParkingError;
use super::parking_model::Cost;
use crate::errors::Result;
use crate::rates::RateConfig;

/// Number of hours billed for `elapsed`: `max(1, ceil(hours))`.
pub fn billable_hours(elapsed: Duration) -> i64 {
    let whole = elapsed.num_hours();
    let remainder = elapsed - Duration::hours(whole);
    let hours = if remainder > Duration::zero() {
        whole + 1
    } else {
        whole
    };
    hours.max(1)
}

/// Computes the cost of parking from `started_at` until `as_of`.
///
/// Used both to settle a finished session and to preview an active one;
/// nothing is mutated.
pub fn compute_cost(
    started_at: DateTime<Utc>,
    as_of: DateTime<Utc>,
    rate: &RateConfig,
) -> Result<Cost> {
    if as_of < started_at {
        return Err(ParkingError::InvalidInterval { started_at, as_of }.into());
    }

    let elapsed = as_of - started_at;
    let billable_hours = billable_hours(elapsed);
    let amount = rate.hourly_rate * Decimal::from(billable_hours);

    Ok(Cost {
        elapsed,
        billable_hours,
        amount,
    })
}
