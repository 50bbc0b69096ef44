//! Helpers for reading and writing column values.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;

/// Parses a decimal stored as TEXT.
///
/// Money columns never fall back to zero: a value that does not parse is
/// reported as corrupt.
pub fn parse_decimal(column: &'static str, raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw.trim()).map_err(|e| StorageError::corrupt(column, e))
}

/// Formats a decimal for a TEXT column without trailing zeros.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}
