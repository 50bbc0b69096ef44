use async_trait::async_trait;

use super::rates_model::{NewRateConfig, RateConfig};
use crate::errors::Result;

/// Trait for city rate repository operations
#[async_trait]
pub trait RateRepositoryTrait: Send + Sync {
    /// Returns `None` when the city has no configured rate.
    fn get_rate_config(&self, city_id: &str) -> Result<Option<RateConfig>>;
    fn list_rate_configs(&self) -> Result<Vec<RateConfig>>;
    async fn upsert_rate_config(&self, rate: NewRateConfig) -> Result<RateConfig>;
}

/// Trait for city rate service operations
#[async_trait]
pub trait RateServiceTrait: Send + Sync {
    fn get_rate_config(&self, city_id: &str) -> Result<RateConfig>;
    fn list_rate_configs(&self) -> Result<Vec<RateConfig>>;
    async fn save_rate_config(&self, rate: NewRateConfig) -> Result<RateConfig>;
}
