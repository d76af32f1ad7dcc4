//! Availability aggregate
//!
//! A day on which a provider accepts bookings.

pub mod model;
pub mod repository;

pub use model::Availability;
pub use repository::AvailabilityRepository;
