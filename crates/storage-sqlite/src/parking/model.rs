//! Database models for parking sessions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use parking_core::parking::ParkingSession;

use crate::errors::StorageError;
use crate::utils::{format_decimal, parse_decimal};

/// Database model for parking sessions. Instants are stored as naive UTC.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::parking_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ParkingSessionDB {
    pub id: String,
    pub patent: String,
    pub user_id: String,
    pub city_id: String,
    pub started_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
    pub active: bool,
    pub amount_charged: Option<String>,
}

impl TryFrom<ParkingSessionDB> for ParkingSession {
    type Error = StorageError;

    fn try_from(db: ParkingSessionDB) -> Result<Self, Self::Error> {
        let amount_charged = db
            .amount_charged
            .as_deref()
            .map(|raw| parse_decimal("parking_sessions.amount_charged", raw))
            .transpose()?;

        Ok(Self {
            id: db.id,
            patent: db.patent,
            user_id: db.user_id,
            city_id: db.city_id,
            started_at: db.started_at.and_utc(),
            finished_at: db.finished_at.map(|t| t.and_utc()),
            active: db.active,
            amount_charged,
        })
    }
}

impl From<ParkingSession> for ParkingSessionDB {
    fn from(domain: ParkingSession) -> Self {
        Self {
            id: domain.id,
            patent: domain.patent,
            user_id: domain.user_id,
            city_id: domain.city_id,
            started_at: domain.started_at.naive_utc(),
            finished_at: domain.finished_at.map(|t| t.naive_utc()),
            active: domain.active,
            amount_charged: domain.amount_charged.map(format_decimal),
        }
    }
}
