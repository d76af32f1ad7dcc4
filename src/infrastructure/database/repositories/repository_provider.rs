//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    AvailabilityRepository, BookingRepository, ProviderRepository, RepositoryProvider,
    UserRepository,
};

use super::availability_repository::SeaOrmAvailabilityRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::provider_repository::SeaOrmProviderRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let provider = repos.providers().find_by_id(1).await?;
/// let history = repos.bookings().list_for_customer(&user.id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    providers: SeaOrmProviderRepository,
    availability: SeaOrmAvailabilityRepository,
    bookings: SeaOrmBookingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            providers: SeaOrmProviderRepository::new(db.clone()),
            availability: SeaOrmAvailabilityRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn providers(&self) -> &dyn ProviderRepository {
        &self.providers
    }

    fn availability(&self) -> &dyn AvailabilityRepository {
        &self.availability
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}
