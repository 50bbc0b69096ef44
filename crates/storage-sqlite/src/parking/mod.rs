//! SQLite storage implementation for parking sessions.

mod model;
mod repository;

pub use model::ParkingSessionDB;
pub use repository::ParkingSessionRepository;
