//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::availability::AvailabilityRepository;
use super::booking::BookingRepository;
use super::provider::ProviderRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let provider = repos.providers().find_by_id(7).await?;
///     let open = repos.availability().exists(7, date).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn providers(&self) -> &dyn ProviderRepository;
    fn availability(&self) -> &dyn AvailabilityRepository;
    fn bookings(&self) -> &dyn BookingRepository;
}
