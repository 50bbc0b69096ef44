use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use super::holidays_model::{Holiday, HolidayCalendar};
use super::holidays_traits::{HolidayRepositoryTrait, HolidayServiceTrait};
use crate::errors::Result;

/// Service for maintaining the holiday calendar
pub struct HolidayService {
    repository: Arc<dyn HolidayRepositoryTrait>,
}

impl HolidayService {
    pub fn new(repository: Arc<dyn HolidayRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl HolidayServiceTrait for HolidayService {
    fn get_holiday_calendar(&self) -> Result<HolidayCalendar> {
        self.repository.get_holiday_calendar()
    }

    fn list_holidays(&self) -> Result<Vec<Holiday>> {
        self.repository.list_holidays()
    }

    async fn add_holiday(&self, mut holiday: Holiday) -> Result<Holiday> {
        holiday.description = holiday
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        info!("Adding holiday {}", holiday.date);
        self.repository.add_holiday(holiday).await
    }

    async fn remove_holiday(&self, date: NaiveDate) -> Result<usize> {
        info!("Removing holiday {}", date);
        self.repository.remove_holiday(date).await
    }
}
