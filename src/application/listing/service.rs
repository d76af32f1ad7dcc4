//! Read-side queries: browsing providers, calendars and a customer's bookings

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, Instrument, Span};

use crate::domain::{
    Availability, BookingWithProvider, DomainError, DomainResult, Principal, Provider,
    ProviderFilter, RepositoryProvider,
};
use crate::shared::{Page, PaginationParams};

pub const PROVIDERS_PAGE_SIZE: u64 = 12;
pub const AVAILABILITY_PAGE_SIZE: u64 = 15;

pub struct ListingService {
    repos: Arc<dyn RepositoryProvider>,
    providers_page_size: u64,
    availability_page_size: u64,
    span: Span,
}

impl ListingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            repos,
            providers_page_size: PROVIDERS_PAGE_SIZE,
            availability_page_size: AVAILABILITY_PAGE_SIZE,
            span: Span::none(),
        }
    }

    pub fn with_page_sizes(mut self, providers: u64, availability: u64) -> Self {
        self.providers_page_size = providers.max(1);
        self.availability_page_size = availability.max(1);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Providers matching the filter, newest first. Out-of-range pages
    /// are clamped to the nearest valid one.
    pub async fn list_providers(
        &self,
        filter: &ProviderFilter,
        page: i64,
    ) -> DomainResult<Page<Provider>> {
        let params = PaginationParams::new(to_page(page), self.providers_page_size);
        let result = self
            .repos
            .providers()
            .list(filter, params)
            .instrument(self.span.clone())
            .await?;
        debug!(
            parent: &self.span,
            total = result.total,
            page = result.page,
            "Providers listed"
        );
        Ok(result)
    }

    /// A provider's advertised dates, earliest first
    pub async fn list_provider_availability(
        &self,
        provider_id: i32,
        page: i64,
    ) -> DomainResult<Page<Availability>> {
        async {
            self.require_provider(provider_id).await?;
            let params = PaginationParams::new(to_page(page), self.availability_page_size);
            self.repos
                .availability()
                .list_for_provider(provider_id, params)
                .await
        }
        .instrument(self.span.clone())
        .await
    }

    /// Advertised dates on or after `from`, earliest first
    pub async fn list_available_dates(
        &self,
        provider_id: i32,
        from: NaiveDate,
    ) -> DomainResult<Vec<NaiveDate>> {
        async {
            self.require_provider(provider_id).await?;
            self.repos.availability().dates_from(provider_id, from).await
        }
        .instrument(self.span.clone())
        .await
    }

    /// The customer's bookings, latest date first, each with its provider
    pub async fn list_user_bookings(
        &self,
        customer: &Principal,
    ) -> DomainResult<Vec<BookingWithProvider>> {
        self.repos
            .bookings()
            .list_for_customer(&customer.user_id)
            .instrument(self.span.clone())
            .await
    }

    async fn require_provider(&self, provider_id: i32) -> DomainResult<()> {
        match self.repos.providers().find_by_id(provider_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Provider", "id", provider_id)),
        }
    }
}

/// Page numbers below 1 are served as page 1.
fn to_page(page: i64) -> u64 {
    page.max(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_pages_become_first() {
        assert_eq!(to_page(-3), 1);
        assert_eq!(to_page(0), 1);
        assert_eq!(to_page(4), 4);
    }
}
