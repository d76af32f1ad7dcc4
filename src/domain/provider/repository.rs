//! Provider repository interface

use async_trait::async_trait;

use super::model::{Category, Provider, ProviderFilter, ProviderProfile};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Insert a provider owned by `user_id`; sets both timestamps to now.
    async fn insert(&self, user_id: &str, profile: ProviderProfile) -> DomainResult<Provider>;

    /// Overwrite the profile fields, refreshing `updated_at`.
    async fn update(&self, id: i32, profile: ProviderProfile) -> DomainResult<Provider>;

    async fn set_certification(&self, id: i32, reference: Option<String>)
        -> DomainResult<Provider>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Provider>>;

    /// Providers owned by a user, newest first
    async fn find_by_owner(&self, user_id: &str) -> DomainResult<Vec<Provider>>;

    /// Provider owned by `user_id` with exactly this name, category and location
    async fn find_matching(
        &self,
        user_id: &str,
        name: &str,
        category: Category,
        location: &str,
    ) -> DomainResult<Option<Provider>>;

    /// Delete a provider; availability and bookings go with it.
    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Filtered listing, newest first
    async fn list(
        &self,
        filter: &ProviderFilter,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Provider>>;
}
