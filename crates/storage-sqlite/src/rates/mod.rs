//! SQLite storage implementation for city rates.

mod model;
mod repository;

pub use model::CityDB;
pub use repository::RateRepository;
