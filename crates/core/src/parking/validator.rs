//! Session validator.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::parking_errors::Rejection;
use crate::holidays::HolidayCalendar;
use crate::rates::RateConfig;
use crate::utils::time_utils::local_date;

/// Decides whether parking may be started or finished at `now`.
///
/// Rules, in order:
/// 1. a negative rate or an unparseable timezone makes the rate unusable;
/// 2. the city's local date being a holiday blocks parking.
///
/// Pure: the same inputs always give the same answer.
pub fn validate(
    rate: &RateConfig,
    holidays: &HolidayCalendar,
    now: DateTime<Utc>,
) -> Result<(), Rejection> {
    if rate.hourly_rate < Decimal::ZERO {
        return Err(Rejection::RateUnavailable(rate.city_id.clone()));
    }
    let tz = rate
        .tz()
        .map_err(|_| Rejection::RateUnavailable(rate.city_id.clone()))?;

    let today = local_date(now, tz);
    if holidays.contains(&today) {
        return Err(Rejection::HolidayBlocked(today));
    }

    Ok(())
}
