use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use parking_core::errors::{Error, Result};
use parking_core::rates::{NewRateConfig, RateConfig, RateRepositoryTrait};
use std::sync::Arc;

use super::model::CityDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::cities;
use crate::utils::format_decimal;

pub struct RateRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl RateRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RateRepositoryTrait for RateRepository {
    fn get_rate_config(&self, city_id: &str) -> Result<Option<RateConfig>> {
        let mut conn = get_connection(&self.pool)?;
        let row = cities::table
            .find(city_id)
            .select(CityDB::as_select())
            .first::<CityDB>(&mut conn)
            .optional()
            .into_core()?;

        row.map(RateConfig::try_from)
            .transpose()
            .map_err(Error::from)
    }

    fn list_rate_configs(&self) -> Result<Vec<RateConfig>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = cities::table
            .select(CityDB::as_select())
            .order(cities::id.asc())
            .load::<CityDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| RateConfig::try_from(row).map_err(Error::from))
            .collect()
    }

    async fn upsert_rate_config(&self, rate: NewRateConfig) -> Result<RateConfig> {
        let city_db = CityDB {
            id: rate.city_id.trim().to_string(),
            name: rate.name.trim().to_string(),
            hourly_rate: format_decimal(rate.hourly_rate),
            timezone: rate.timezone.trim().to_string(),
            updated_at: Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn| -> Result<RateConfig> {
                let saved = diesel::insert_into(cities::table)
                    .values(&city_db)
                    .on_conflict(cities::id)
                    .do_update()
                    .set(&city_db)
                    .returning(CityDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(RateConfig::try_from(saved)?)
            })
            .await
    }
}
