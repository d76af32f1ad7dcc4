//! Booking domain entity

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::provider::Provider;

/// At most one booking exists per (provider, booking_date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub id: i32,
    /// Customer user id
    pub customer_id: String,
    pub provider_id: i32,
    pub booking_date: NaiveDate,
}

impl Booking {
    pub fn is_owned_by(&self, customer_id: &str) -> bool {
        self.customer_id == customer_id
    }
}

/// Booking not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_id: String,
    pub provider_id: i32,
    pub booking_date: NaiveDate,
}

/// Booking with its provider attached, for history listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingWithProvider {
    pub booking: Booking,
    pub provider: Provider,
}
