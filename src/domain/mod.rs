pub mod availability;
pub mod booking;
pub mod provider;
pub mod repositories;
pub mod user;
pub mod validation;

// Re-export commonly used types
pub use availability::{Availability, AvailabilityRepository};
pub use booking::{Booking, BookingRepository, BookingWithProvider, NewBooking};
pub use provider::{
    Category, CertificationUpload, Provider, ProviderFilter, ProviderInput, ProviderProfile,
    ProviderRepository,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{CreateUserDto, Principal, User, UserRepository};
pub use validation::SlotState;

pub use crate::shared::errors::DomainError;
