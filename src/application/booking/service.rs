//! Booking workflow: validate, persist, then notify
//!
//! The validators run first so callers get the precise reason a date is
//! refused. The repository still guards the slot with the unique index, so
//! a booking that slips past the checks concurrently ends in
//! `AlreadyBooked` rather than a second row.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn, Instrument, Span};

use crate::application::notifications::{templates, NotificationDispatcher};
use crate::application::ports::OutgoingEmail;
use crate::domain::validation::{check_booking_date, SlotState};
use crate::domain::{
    Booking, DomainError, DomainResult, NewBooking, Principal, Provider, RepositoryProvider,
};
use crate::shared::clock::Clock;

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    notifier: Arc<NotificationDispatcher>,
    clock: Arc<dyn Clock>,
    span: Span,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifier: Arc<NotificationDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos,
            notifier,
            clock,
            span: Span::none(),
        }
    }

    /// Run every call of this service inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    // ── Validation ──────────────────────────────────────────────

    /// Check `date` against the provider's calendar as stored right now.
    /// A booking id in `excluding` does not count as occupying the slot.
    pub async fn validate_booking_date(
        &self,
        provider_id: i32,
        date: NaiveDate,
        excluding: Option<i32>,
    ) -> DomainResult<NaiveDate> {
        let today = self.clock.today();
        if date < today {
            return Err(DomainError::PastDate);
        }
        let slot = SlotState {
            available: self.repos.availability().exists(provider_id, date).await?,
            booked_by: self
                .repos
                .bookings()
                .find_by_slot(provider_id, date)
                .await?
                .map(|b| b.id),
        };
        check_booking_date(date, today, &slot, excluding)
    }

    // ── Mutations ───────────────────────────────────────────────

    pub async fn create_booking(
        &self,
        customer: &Principal,
        provider_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Booking> {
        async {
            let provider = self
                .repos
                .providers()
                .find_by_id(provider_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Provider", "id", provider_id))?;

            self.validate_booking_date(provider_id, date, None).await?;

            let booking = self
                .repos
                .bookings()
                .create(NewBooking {
                    customer_id: customer.user_id.clone(),
                    provider_id,
                    booking_date: date,
                })
                .await?;
            info!(
                booking_id = booking.id,
                provider_id,
                %date,
                customer = %customer.username,
                "Booking created"
            );

            let messages = self.booking_messages(customer, &provider, date).await;
            self.notifier.dispatch(messages).await;
            Ok(booking)
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn cancel_booking(&self, customer: &Principal, booking_id: i32) -> DomainResult<()> {
        async {
            let cancelled = self
                .repos
                .bookings()
                .cancel_for_customer(booking_id, &customer.user_id)
                .await?;
            info!(
                booking_id,
                provider_id = cancelled.provider.id,
                date = %cancelled.booking.booking_date,
                "Booking cancelled"
            );

            let messages = self
                .notifier
                .compose(
                    &customer.email,
                    templates::booking_cancelled(
                        &cancelled.provider.name,
                        cancelled.booking.booking_date,
                    ),
                )
                .into_iter()
                .collect();
            self.notifier.dispatch(messages).await;
            Ok(())
        }
        .instrument(self.span.clone())
        .await
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Confirmation for the customer plus a heads-up for the provider's owner.
    async fn booking_messages(
        &self,
        customer: &Principal,
        provider: &Provider,
        date: NaiveDate,
    ) -> Vec<OutgoingEmail> {
        let mut messages = Vec::with_capacity(2);
        messages.extend(self.notifier.compose(
            &customer.email,
            templates::booking_confirmed(&provider.name, date),
        ));

        match self.repos.users().get_user_by_id(&provider.user_id).await {
            Ok(Some(owner)) => messages.extend(
                self.notifier
                    .compose(&owner.email, templates::new_booking(date, &customer.username)),
            ),
            Ok(None) => warn!(provider_id = provider.id, "Provider owner not found"),
            Err(e) => warn!(provider_id = provider.id, error = %e, "Provider owner lookup failed"),
        }
        messages
    }
}
