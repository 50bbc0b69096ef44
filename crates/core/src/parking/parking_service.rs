use async_trait::async_trait;
use log::{debug, info, warn};
use std::sync::Arc;

use super::billing::compute_cost;
use super::key_lock::KeyedLocks;
use super::parking_errors::ParkingError;
use super::parking_model::{
    normalize_patent, ParkingSession, SessionTarget, StartParking, StatusPreview,
};
use super::parking_traits::{ParkingServiceTrait, ParkingSessionRepositoryTrait};
use super::validator::validate;
use crate::accounts::{settle, AccountRepositoryTrait};
use crate::config::EngineConfig;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::holidays::HolidayRepositoryTrait;
use crate::rates::{RateConfig, RateRepositoryTrait};
use crate::utils::{Clock, SystemClock};

fn patent_key(patent: &str) -> String {
    format!("patent:{}", patent)
}

fn account_key(user_id: &str) -> String {
    format!("account:{}", user_id)
}

/// Session lifecycle engine.
///
/// Starts are serialized per patent, and anything touching a balance is
/// serialized per account. Locks are always taken patent first, then account.
pub struct ParkingService {
    sessions: Arc<dyn ParkingSessionRepositoryTrait>,
    accounts: Arc<dyn AccountRepositoryTrait>,
    rates: Arc<dyn RateRepositoryTrait>,
    holidays: Arc<dyn HolidayRepositoryTrait>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    locks: KeyedLocks,
}

impl ParkingService {
    pub fn new(
        sessions: Arc<dyn ParkingSessionRepositoryTrait>,
        accounts: Arc<dyn AccountRepositoryTrait>,
        rates: Arc<dyn RateRepositoryTrait>,
        holidays: Arc<dyn HolidayRepositoryTrait>,
        config: EngineConfig,
    ) -> Self {
        Self {
            sessions,
            accounts,
            rates,
            holidays,
            clock: Arc::new(SystemClock),
            config,
            locks: KeyedLocks::new(),
        }
    }

    /// Replaces the wall clock, mostly for tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn load_rate(&self, city_id: &str) -> Result<RateConfig> {
        match self.rates.get_rate_config(city_id)? {
            Some(rate) => Ok(rate.with_fallback_timezone(self.config.fallback_timezone)),
            None => {
                warn!("No rate configured for city {}", city_id);
                Err(ParkingError::RateUnavailable(city_id.to_string()).into())
            }
        }
    }

    fn find_active(&self, target: &SessionTarget) -> Result<Option<ParkingSession>> {
        match target {
            SessionTarget::Patent(raw) => {
                let patent = normalize_patent(raw)?;
                self.sessions.find_active_by_patent(&patent)
            }
            SessionTarget::User(user_id) => self.sessions.find_active_by_user(user_id),
        }
    }

    /// Checks the calendar and the rate at `now`, logging the refusal.
    fn check_allowed(&self, rate: &RateConfig, now: chrono::DateTime<chrono::Utc>) -> Result<()> {
        let calendar = self.holidays.get_holiday_calendar()?;
        validate(rate, &calendar, now).map_err(|rejection| {
            debug!("Parking refused for city {}: {}", rate.city_id, rejection);
            Error::from(rejection)
        })
    }
}

#[async_trait]
impl ParkingServiceTrait for ParkingService {
    async fn start_parking(&self, request: StartParking) -> Result<ParkingSession> {
        let patent = normalize_patent(&request.patent)?;
        let user_id = request.user_id.trim().to_string();
        if user_id.is_empty() {
            return Err(ValidationError::MissingField("userId".to_string()).into());
        }
        let city_id = request
            .city_id
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.config.default_city_id.clone());

        let _patent_guard = self.locks.lock(patent_key(&patent)).await;

        if let Some(existing) = self.sessions.find_active_by_patent(&patent)? {
            debug!(
                "Patent {} already has active session {} since {}",
                patent, existing.id, existing.started_at
            );
            return Err(ParkingError::AlreadyStarted(patent).into());
        }

        let rate = self.load_rate(&city_id)?;
        let now = self.clock.now();
        self.check_allowed(&rate, now)?;

        let _account_guard = self.locks.lock(account_key(&user_id)).await;

        let account = self.accounts.get_by_user(&user_id)?;
        if account.balance < rate.hourly_rate {
            debug!(
                "User {} cannot afford one hour in city {}: {} < {}",
                user_id, city_id, account.balance, rate.hourly_rate
            );
            return Err(ParkingError::InsufficientFunds {
                balance: account.balance,
                required: rate.hourly_rate,
            }
            .into());
        }

        let session = ParkingSession::start(patent.clone(), user_id, city_id, now);
        let created = match self.sessions.create(session).await {
            Err(Error::Database(DatabaseError::UniqueViolation(msg))) => {
                warn!("Storage refused second active session for {}: {}", patent, msg);
                return Err(ParkingError::AlreadyStarted(patent).into());
            }
            other => other?,
        };

        info!(
            "Started parking session {} for patent {} (user {}, city {})",
            created.id, created.patent, created.user_id, created.city_id
        );
        Ok(created)
    }

    async fn finish_parking(&self, target: SessionTarget) -> Result<ParkingSession> {
        let located = self
            .find_active(&target)?
            .ok_or_else(|| ParkingError::NotFound(target.to_string()))?;

        let _patent_guard = self.locks.lock(patent_key(&located.patent)).await;
        let _account_guard = self.locks.lock(account_key(&located.user_id)).await;

        // Only the located session is finished. If another finish closed it
        // while we waited, the caller gets NotFound even when the patent has
        // since been restarted.
        let session = match self.sessions.find_by_id(&located.id)? {
            Some(session) if session.active => session,
            _ => return Err(ParkingError::NotFound(target.to_string()).into()),
        };

        let rate = self.load_rate(&session.city_id)?;
        let now = self.clock.now();
        self.check_allowed(&rate, now)?;

        let cost = compute_cost(session.started_at, now, &rate)?;
        let account = self.accounts.get_by_user(&session.user_id)?;
        let label = self.config.settlement_label(&session.patent);

        let (debited, entry) = settle(&account, cost.amount, &label, now)?;
        let balance_after = debited.balance;
        let finished = session.finish(now, cost.amount)?;
        let saved = self
            .sessions
            .finish_and_settle(finished, debited, entry)
            .await?;

        info!(
            "Finished parking session {} for patent {}: {} h, charged {}, balance now {}",
            saved.id, saved.patent, cost.billable_hours, cost.amount, balance_after
        );
        Ok(saved)
    }

    fn status_preview(&self, user_id: &str) -> Result<Option<StatusPreview>> {
        let Some(session) = self.sessions.find_active_by_user(user_id)? else {
            return Ok(None);
        };
        let rate = self.load_rate(&session.city_id)?;
        let now = self.clock.now();
        let cost = compute_cost(session.started_at, now, &rate)?;
        Ok(Some(StatusPreview::new(&session, now, &cost)))
    }

    fn has_active_session(&self, user_id: &str) -> Result<bool> {
        Ok(self.sessions.find_active_by_user(user_id)?.is_some())
    }

    fn get_session(&self, session_id: &str) -> Result<ParkingSession> {
        self.sessions
            .find_by_id(session_id)?
            .ok_or_else(|| ParkingError::NotFound(format!("session {}", session_id)).into())
    }

    fn list_sessions(&self, user_id: &str) -> Result<Vec<ParkingSession>> {
        self.sessions.list_by_user(user_id)
    }
}
