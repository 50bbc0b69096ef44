//! Parking module - session lifecycle, validation and billing.

mod billing;
mod key_lock;
mod parking_errors;
mod parking_model;
mod parking_service;
mod parking_traits;
mod validator;


pub use billing::{billable_hours, compute_cost};
pub use key_lock::{KeyedLockGuard, KeyedLocks};
pub use parking_errors::{ParkingError, Rejection};
pub use parking_model::{
    normalize_patent, Cost, ParkingSession, SessionState, SessionTarget, StartParking,
    StatusPreview,
};
pub use parking_service::ParkingService;
pub use parking_traits::{ParkingServiceTrait, ParkingSessionRepositoryTrait};
pub use validator::validate;
