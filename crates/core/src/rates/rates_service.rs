use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use super::rates_model::{NewRateConfig, RateConfig};
use super::rates_traits::{RateRepositoryTrait, RateServiceTrait};
use crate::errors::{DatabaseError, Result};

/// Service for administering per-city rates
pub struct RateService {
    repository: Arc<dyn RateRepositoryTrait>,
}

impl RateService {
    pub fn new(repository: Arc<dyn RateRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RateServiceTrait for RateService {
    fn get_rate_config(&self, city_id: &str) -> Result<RateConfig> {
        self.repository.get_rate_config(city_id)?.ok_or_else(|| {
            DatabaseError::NotFound(format!("No rate configured for city {}", city_id)).into()
        })
    }

    fn list_rate_configs(&self) -> Result<Vec<RateConfig>> {
        self.repository.list_rate_configs()
    }

    async fn save_rate_config(&self, rate: NewRateConfig) -> Result<RateConfig> {
        rate.validate()?;
        debug!(
            "Saving rate for city {}: {} per hour",
            rate.city_id, rate.hourly_rate
        );
        let saved = self.repository.upsert_rate_config(rate).await?;
        info!("Rate for city {} is now {}", saved.city_id, saved.hourly_rate);
        Ok(saved)
    }
}
