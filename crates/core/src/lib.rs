//! Parking Core - Domain entities, services, and traits.
//!
//! This crate contains the session lifecycle and billing logic for the
//! parking meter backend. It is database-agnostic and defines traits that
//! are implemented by the `storage-sqlite` crate.

pub mod accounts;
pub mod config;
pub mod constants;
pub mod errors;
pub mod holidays;
pub mod parking;
pub mod rates;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
