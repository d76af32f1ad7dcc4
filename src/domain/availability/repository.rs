//! Availability repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Availability;
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Insert a day. An existing (provider, date) row yields `Duplicate`.
    async fn insert(&self, provider_id: i32, date: NaiveDate) -> DomainResult<Availability>;

    async fn exists(&self, provider_id: i32, date: NaiveDate) -> DomainResult<bool>;

    /// Delete one row belonging to `provider_id`; `NotFound` if there is none.
    async fn delete_for_provider(&self, provider_id: i32, availability_id: i32)
        -> DomainResult<Availability>;

    /// Delete every day of a provider, returning how many were removed
    async fn clear_for_provider(&self, provider_id: i32) -> DomainResult<u64>;

    /// Days of a provider, ascending
    async fn list_for_provider(
        &self,
        provider_id: i32,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Availability>>;

    /// Dates on or after `from`, ascending
    async fn dates_from(&self, provider_id: i32, from: NaiveDate) -> DomainResult<Vec<NaiveDate>>;
}
