//! Database models for city rates.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use parking_core::rates::RateConfig;

use crate::errors::StorageError;
use crate::utils::parse_decimal;

/// Database model for cities
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::cities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CityDB {
    pub id: String,
    pub name: String,
    pub hourly_rate: String,
    pub timezone: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<CityDB> for RateConfig {
    type Error = StorageError;

    fn try_from(db: CityDB) -> Result<Self, Self::Error> {
        Ok(Self {
            hourly_rate: parse_decimal("cities.hourly_rate", &db.hourly_rate)?,
            city_id: db.id,
            name: db.name,
            timezone: db.timezone,
            updated_at: db.updated_at,
        })
    }
}
