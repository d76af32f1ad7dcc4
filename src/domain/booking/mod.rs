//! Booking aggregate
//!
//! A customer's reservation of a provider on one date.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingWithProvider, NewBooking};
pub use repository::BookingRepository;
