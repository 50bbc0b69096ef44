//! Parking session domain models.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::parking_errors::ParkingError;
use crate::errors::{Error, Result, ValidationError};

/// Lifecycle state of a session. `Finished` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Active,
    Finished,
}

/// One metering interval for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSession {
    pub id: String,
    /// License plate, normalized with [`normalize_patent`].
    pub patent: String,
    pub user_id: String,
    /// City whose rate bills this session.
    pub city_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub amount_charged: Option<Decimal>,
}

impl ParkingSession {
    /// Opens a new active session.
    pub fn start(
        patent: impl Into<String>,
        user_id: impl Into<String>,
        city_id: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            patent: patent.into(),
            user_id: user_id.into(),
            city_id: city_id.into(),
            started_at: at,
            finished_at: None,
            active: true,
            amount_charged: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.active {
            SessionState::Active
        } else {
            SessionState::Finished
        }
    }

    /// Closes the session. A session that is already finished cannot be
    /// closed again and reports `NotFound`, same as a missing one.
    pub fn finish(self, at: DateTime<Utc>, amount: Decimal) -> Result<Self> {
        if !self.active {
            return Err(ParkingError::NotFound(format!("session {}", self.id)).into());
        }
        Ok(Self {
            finished_at: Some(at),
            active: false,
            amount_charged: Some(amount),
            ..self
        })
    }
}

/// Trims and upper-cases a license plate so lookups are insensitive to how
/// the user typed it.
pub fn normalize_patent(raw: &str) -> Result<String> {
    let patent = raw.trim().to_uppercase();
    if patent.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "patent".to_string(),
        )));
    }
    Ok(patent)
}

/// Input model for starting a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartParking {
    pub patent: String,
    pub user_id: String,
    /// Falls back to the engine's default city when absent.
    #[serde(default)]
    pub city_id: Option<String>,
}

/// Which active session a finish request refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTarget {
    Patent(String),
    User(String),
}

impl fmt::Display for SessionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionTarget::Patent(patent) => write!(f, "patent {}", patent),
            SessionTarget::User(user_id) => write!(f, "user {}", user_id),
        }
    }
}

/// Output of the billing calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct Cost {
    pub elapsed: Duration,
    pub billable_hours: i64,
    pub amount: Decimal,
}

/// As-of-now view of an active session, for polling clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPreview {
    pub session_id: String,
    pub patent: String,
    pub city_id: String,
    pub started_at: DateTime<Utc>,
    pub as_of: DateTime<Utc>,
    pub elapsed_seconds: i64,
    pub billable_hours: i64,
    pub amount: Decimal,
}

impl StatusPreview {
    pub fn new(session: &ParkingSession, as_of: DateTime<Utc>, cost: &Cost) -> Self {
        Self {
            session_id: session.id.clone(),
            patent: session.patent.clone(),
            city_id: session.city_id.clone(),
            started_at: session.started_at,
            as_of,
            elapsed_seconds: cost.elapsed.num_seconds(),
            billable_hours: cost.billable_hours,
            amount: cost.amount,
        }
    }
}
