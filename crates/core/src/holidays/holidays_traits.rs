use async_trait::async_trait;
use chrono::NaiveDate;

use super::holidays_model::{Holiday, HolidayCalendar};
use crate::errors::Result;

/// Trait for holiday repository operations
#[async_trait]
pub trait HolidayRepositoryTrait: Send + Sync {
    fn list_holidays(&self) -> Result<Vec<Holiday>>;

    /// Loads every holiday date as a calendar.
    fn get_holiday_calendar(&self) -> Result<HolidayCalendar> {
        Ok(self.list_holidays()?.iter().collect())
    }

    /// Inserts the holiday, replacing the description if the date exists.
    async fn add_holiday(&self, holiday: Holiday) -> Result<Holiday>;

    /// Returns the number of deleted records.
    async fn remove_holiday(&self, date: NaiveDate) -> Result<usize>;
}

/// Trait for holiday service operations
#[async_trait]
pub trait HolidayServiceTrait: Send + Sync {
    fn get_holiday_calendar(&self) -> Result<HolidayCalendar>;
    fn list_holidays(&self) -> Result<Vec<Holiday>>;
    async fn add_holiday(&self, holiday: Holiday) -> Result<Holiday>;
    async fn remove_holiday(&self, date: NaiveDate) -> Result<usize>;
}
