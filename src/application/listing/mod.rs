pub mod service;

pub use service::{ListingService, AVAILABILITY_PAGE_SIZE, PROVIDERS_PAGE_SIZE};
