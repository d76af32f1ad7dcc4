//! Booking notifications
//!
//! Messages are composed from templates and handed to the dispatcher after
//! the triggering mutation has committed. Delivery never fails the caller.

pub mod dispatcher;
pub mod templates;

pub use dispatcher::{DeliveryMode, NotificationDispatcher};
