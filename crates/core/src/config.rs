//! Engine configuration.

use chrono_tz::Tz;
use log::debug;

use crate::constants::{
    DEFAULT_CITY_ID, DEFAULT_TIMEZONE, ENV_DEFAULT_CITY_ID, ENV_DEFAULT_TIMEZONE,
    ENV_LEDGER_LABEL_PREFIX, SETTLEMENT_LABEL_PREFIX,
};
use crate::errors::{Error, Result};
use crate::utils::time_utils::parse_timezone;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// City whose rate applies when a start request does not name one.
    pub default_city_id: String,
    /// Used for cities whose configured timezone is blank.
    pub fallback_timezone: Tz,
    /// Ledger entries written on settlement are labelled `<prefix> <PATENT>`.
    pub ledger_label_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_city_id: DEFAULT_CITY_ID.to_string(),
            fallback_timezone: chrono_tz::UTC,
            ledger_label_prefix: SETTLEMENT_LABEL_PREFIX.to_string(),
        }
    }
}

impl EngineConfig {
    /// Loads the configuration from the process environment, reading a `.env`
    /// file first when one is present. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_city_id = lookup(ENV_DEFAULT_CITY_ID)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_CITY_ID.to_string());
        if default_city_id.is_empty() {
            return Err(Error::InvalidConfigValue(format!(
                "{} must not be empty",
                ENV_DEFAULT_CITY_ID
            )));
        }

        let tz_name = lookup(ENV_DEFAULT_TIMEZONE).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let fallback_timezone = parse_timezone(&tz_name).map_err(|_| {
            Error::InvalidConfigValue(format!("{}='{}'", ENV_DEFAULT_TIMEZONE, tz_name))
        })?;

        let ledger_label_prefix = lookup(ENV_LEDGER_LABEL_PREFIX)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| SETTLEMENT_LABEL_PREFIX.to_string());

        debug!(
            "Engine config: default_city_id={}, fallback_timezone={}",
            default_city_id, fallback_timezone
        );

        Ok(Self {
            default_city_id,
            fallback_timezone,
            ledger_label_prefix,
        })
    }

    /// Builds the ledger label for settling a session on `patent`.
    pub fn settlement_label(&self, patent: &str) -> String {
        format!("{} {}", self.ledger_label_prefix, patent)
    }
}
