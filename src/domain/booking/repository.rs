//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Booking, BookingWithProvider, NewBooking};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a booking in one transaction, re-checking that the day is
    /// still advertised. A taken slot yields `AlreadyBooked` (also when the
    /// unique index rejects a concurrent insert), a withdrawn day yields
    /// `UnavailableDate`.
    async fn create(&self, booking: NewBooking) -> DomainResult<Booking>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    async fn find_by_slot(&self, provider_id: i32, date: NaiveDate)
        -> DomainResult<Option<Booking>>;

    /// Delete a booking owned by `customer_id` in one transaction and return
    /// it. `NotFound` if missing, `Forbidden` if owned by someone else.
    async fn cancel_for_customer(
        &self,
        id: i32,
        customer_id: &str,
    ) -> DomainResult<BookingWithProvider>;

    /// Bookings of a customer, latest date first
    async fn list_for_customer(&self, customer_id: &str)
        -> DomainResult<Vec<BookingWithProvider>>;
}
