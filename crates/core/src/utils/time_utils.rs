use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::errors::{Result, ValidationError};

/// Parses an IANA timezone name such as `America/Argentina/Buenos_Aires`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim().parse::<Tz>().map_err(|_| {
        ValidationError::InvalidInput(format!("Unknown timezone '{}'", name)).into()
    })
}

/// Converts a UTC instant to the calendar date observed in `tz`.
///
/// This is the single place where "today" is decided for holiday checks.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}
