//! SQLite storage implementation for the holiday calendar.

mod model;
mod repository;

pub use model::HolidayDB;
pub use repository::HolidayRepository;
