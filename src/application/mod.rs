//! Application layer: use-case services over the domain repositories
//!
//! Services receive a `RepositoryProvider`, the outbound ports and a clock;
//! they never touch SeaORM directly.

pub mod booking;
pub mod identity;
pub mod listing;
pub mod notifications;
pub mod ports;
pub mod provider;
pub mod seed;

pub use booking::BookingService;
pub use identity::AccountService;
pub use listing::ListingService;
pub use notifications::{DeliveryMode, NotificationDispatcher};
pub use ports::{FileStore, FileStoreError, Mailer, NotificationError, OutgoingEmail};
pub use provider::ProviderService;
pub use seed::{seed_demo_data, SeedReport};
