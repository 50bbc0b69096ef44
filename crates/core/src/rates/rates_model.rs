//! Rate configuration domain models.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::parse_timezone;

/// Hourly rate and local timezone of one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateConfig {
    pub city_id: String,
    pub name: String,
    pub hourly_rate: Decimal,
    /// IANA timezone name. Blank means "use the engine's fallback".
    pub timezone: String,
    pub updated_at: NaiveDateTime,
}

impl RateConfig {
    /// Resolves the configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Returns a copy whose blank timezone is replaced by `fallback`.
    pub fn with_fallback_timezone(mut self, fallback: Tz) -> Self {
        if self.timezone.trim().is_empty() {
            self.timezone = fallback.name().to_string();
        }
        self
    }
}

/// Input model for creating or replacing a city's rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRateConfig {
    pub city_id: String,
    pub name: String,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub timezone: String,
}

impl NewRateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.city_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "cityId".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "City name cannot be empty".to_string(),
            )));
        }
        if self.hourly_rate < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Hourly rate must not be negative, got {}",
                self.hourly_rate
            ))));
        }
        if !self.timezone.trim().is_empty() {
            parse_timezone(&self.timezone)?;
        }
        Ok(())
    }
}
