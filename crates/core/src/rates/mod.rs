//! Rate configuration module - per-city hourly rates.

mod rates_model;
mod rates_service;
mod rates_traits;


pub use rates_model::{NewRateConfig, RateConfig};
pub use rates_service::RateService;
pub use rates_traits::{RateRepositoryTrait, RateServiceTrait};
