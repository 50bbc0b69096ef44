//! Parking rejection types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::errors::Error;

/// Reasons the validator refuses to let parking proceed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Parking is disallowed on holiday {0}")]
    HolidayBlocked(NaiveDate),

    #[error("No usable rate is configured for city {0}")]
    RateUnavailable(String),
}

/// Typed refusals of the session lifecycle engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParkingError {
    #[error("A parking session is already started for patent {0}")]
    AlreadyStarted(String),

    #[error("Insufficient balance: {balance} available, {required} required")]
    InsufficientFunds { balance: Decimal, required: Decimal },

    #[error("Parking is disallowed on holiday {0}")]
    HolidayBlocked(NaiveDate),

    #[error("No usable rate is configured for city {0}")]
    RateUnavailable(String),

    #[error("No active parking session for {0}")]
    NotFound(String),

    #[error("Invalid interval: {as_of} is before session start {started_at}")]
    InvalidInterval {
        started_at: DateTime<Utc>,
        as_of: DateTime<Utc>,
    },

    #[error("Settlement shortfall: balance {balance} cannot cover {required}")]
    InsufficientFundsAtSettlement { balance: Decimal, required: Decimal },
}

impl ParkingError {
    /// True for states the start gate should have made impossible.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ParkingError::InsufficientFundsAtSettlement { .. })
    }
}

impl From<Rejection> for ParkingError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::HolidayBlocked(date) => ParkingError::HolidayBlocked(date),
            Rejection::RateUnavailable(city_id) => ParkingError::RateUnavailable(city_id),
        }
    }
}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        Error::Parking(rejection.into())
    }
}
