//! Database entities module

pub mod availability;
pub mod booking;
pub mod provider;
pub mod user;

pub use availability::Entity as Availability;
pub use booking::Entity as Booking;
pub use provider::Entity as Provider;
pub use user::Entity as User;
