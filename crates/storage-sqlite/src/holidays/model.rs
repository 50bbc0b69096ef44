use chrono::NaiveDate;
use diesel::prelude::*;
use parking_core::holidays::Holiday;

/// Database model for holidays
#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::holidays)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HolidayDB {
    pub holiday_date: NaiveDate,
    pub description: Option<String>,
}

impl From<HolidayDB> for Holiday {
    fn from(db: HolidayDB) -> Self {
        Self {
            date: db.holiday_date,
            description: db.description,
        }
    }
}

impl From<Holiday> for HolidayDB {
    fn from(domain: Holiday) -> Self {
        Self {
            holiday_date: domain.date,
            description: domain.description,
        }
    }
}
