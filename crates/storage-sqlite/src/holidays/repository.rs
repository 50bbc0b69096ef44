use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use parking_core::errors::Result;
use parking_core::holidays::{Holiday, HolidayRepositoryTrait};
use std::sync::Arc;

use super::model::HolidayDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::holidays;

pub struct HolidayRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HolidayRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HolidayRepositoryTrait for HolidayRepository {
    fn list_holidays(&self) -> Result<Vec<Holiday>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = holidays::table
            .select(HolidayDB::as_select())
            .order(holidays::holiday_date.asc())
            .load::<HolidayDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Holiday::from).collect())
    }

    async fn add_holiday(&self, holiday: Holiday) -> Result<Holiday> {
        let holiday_db = HolidayDB::from(holiday);
        self.writer
            .exec(move |conn| -> Result<Holiday> {
                diesel::insert_into(holidays::table)
                    .values(&holiday_db)
                    .on_conflict(holidays::holiday_date)
                    .do_update()
                    .set(holidays::description.eq(&holiday_db.description))
                    .execute(conn)
                    .into_core()?;
                Ok(Holiday::from(holiday_db))
            })
            .await
    }

    async fn remove_holiday(&self, date: NaiveDate) -> Result<usize> {
        self.writer
            .exec(move |conn| -> Result<usize> {
                diesel::delete(holidays::table.find(date))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
