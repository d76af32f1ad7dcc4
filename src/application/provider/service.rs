//! Provider profile and calendar management for owners
//!
//! Every mutation resolves the provider first and checks that the caller
//! owns it: a missing provider is `NotFound`, someone else's is `Forbidden`.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn, Instrument, Span};

use crate::application::ports::{FileStore, FileStoreError};
use crate::domain::validation::{
    validate_availability_date, validate_certification, validate_provider_input,
};
use crate::domain::{
    Availability, CertificationUpload, DomainError, DomainResult, Principal, Provider,
    ProviderInput, RepositoryProvider,
};
use crate::shared::clock::Clock;

pub struct ProviderService {
    repos: Arc<dyn RepositoryProvider>,
    files: Arc<dyn FileStore>,
    clock: Arc<dyn Clock>,
    span: Span,
}

impl ProviderService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        files: Arc<dyn FileStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            files,
            clock,
            span: Span::none(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    // ── Profile ─────────────────────────────────────────────────

    pub async fn register_provider(
        &self,
        owner: &Principal,
        input: ProviderInput,
    ) -> DomainResult<Provider> {
        async {
            let profile = validate_provider_input(input)?;
            let provider = self.repos.providers().insert(&owner.user_id, profile).await?;
            info!(
                provider_id = provider.id,
                owner = %owner.username,
                category = %provider.category,
                "Provider registered"
            );
            Ok(provider)
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn update_provider(
        &self,
        owner: &Principal,
        provider_id: i32,
        input: ProviderInput,
    ) -> DomainResult<Provider> {
        async {
            self.owned_provider(owner, provider_id).await?;
            let profile = validate_provider_input(input)?;
            let provider = self.repos.providers().update(provider_id, profile).await?;
            debug!(provider_id, "Provider updated");
            Ok(provider)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Validate and store a certification document, replacing any previous one.
    pub async fn attach_certification(
        &self,
        owner: &Principal,
        provider_id: i32,
        file_name: &str,
        bytes: &[u8],
    ) -> DomainResult<Provider> {
        async {
            let existing = self.owned_provider(owner, provider_id).await?;
            validate_certification(&CertificationUpload::new(file_name, bytes.len() as u64))?;

            let reference = self
                .files
                .put(file_name, bytes)
                .await
                .map_err(|e| match e {
                    FileStoreError::InvalidName(name) => {
                        DomainError::Invalid(format!("Invalid file name: {}", name))
                    }
                    other => DomainError::Storage(other.to_string()),
                })?;

            let updated = match self
                .repos
                .providers()
                .set_certification(provider_id, Some(reference.clone()))
                .await
            {
                Ok(p) => p,
                Err(e) => {
                    self.discard_file(&reference).await;
                    return Err(e);
                }
            };

            if let Some(old) = existing.certification.filter(|old| *old != reference) {
                self.discard_file(&old).await;
            }
            info!(provider_id, file = %reference, "Certification attached");
            Ok(updated)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Delete the provider with its availability and bookings.
    pub async fn delete_provider(&self, owner: &Principal, provider_id: i32) -> DomainResult<()> {
        async {
            let existing = self.owned_provider(owner, provider_id).await?;
            self.repos.providers().delete(provider_id).await?;
            if let Some(reference) = existing.certification {
                self.discard_file(&reference).await;
            }
            info!(provider_id, "Provider deleted");
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    /// Dashboard listing, newest first
    pub async fn providers_owned_by(&self, owner: &Principal) -> DomainResult<Vec<Provider>> {
        self.repos
            .providers()
            .find_by_owner(&owner.user_id)
            .instrument(self.span.clone())
            .await
    }

    // ── Availability ────────────────────────────────────────────

    pub async fn add_availability(
        &self,
        owner: &Principal,
        provider_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Availability> {
        async {
            self.owned_provider(owner, provider_id).await?;
            let date = validate_availability_date(date, self.clock.today())?;

            if self.repos.availability().exists(provider_id, date).await? {
                return Err(DomainError::Duplicate(format!(
                    "Availability for {} already exists.",
                    date
                )));
            }
            let slot = self.repos.availability().insert(provider_id, date).await?;
            info!(provider_id, %date, "Availability added");
            Ok(slot)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Bookings already made for that date are kept.
    pub async fn remove_availability(
        &self,
        owner: &Principal,
        provider_id: i32,
        availability_id: i32,
    ) -> DomainResult<Availability> {
        async {
            self.owned_provider(owner, provider_id).await?;
            let removed = self
                .repos
                .availability()
                .delete_for_provider(provider_id, availability_id)
                .await?;
            info!(provider_id, date = %removed.date, "Availability removed");
            Ok(removed)
        }
        .instrument(self.span.clone())
        .await
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn owned_provider(&self, owner: &Principal, provider_id: i32) -> DomainResult<Provider> {
        let provider = self
            .repos
            .providers()
            .find_by_id(provider_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Provider", "id", provider_id))?;
        if !provider.is_owned_by(&owner.user_id) {
            warn!(provider_id, user = %owner.username, "Ownership check failed");
            return Err(DomainError::Forbidden(
                "You can only manage your own providers.".into(),
            ));
        }
        Ok(provider)
    }

    async fn discard_file(&self, reference: &str) {
        if let Err(e) = self.files.delete(reference).await {
            warn!(file = %reference, error = %e, "Failed to remove stored file");
        }
    }
}
