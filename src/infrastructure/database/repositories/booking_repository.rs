//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, warn};

use super::provider_repository::model_to_domain as provider_to_domain;
use super::{db_err, unique_violation};
use crate::domain::{
    Booking, BookingRepository, BookingWithProvider, DomainError, DomainResult, NewBooking,
};
use crate::infrastructure::database::entities::{availability, booking, provider};

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> Booking {
    Booking {
        id: m.id,
        customer_id: m.customer_id,
        provider_id: m.provider_id,
        booking_date: m.booking_date,
    }
}

fn with_provider(
    pair: (booking::Model, Option<provider::Model>),
) -> DomainResult<BookingWithProvider> {
    let (b, p) = pair;
    let provider = p.ok_or_else(|| {
        DomainError::Storage(format!("Booking {} references a missing provider", b.id))
    })?;
    Ok(BookingWithProvider {
        booking: model_to_domain(b),
        provider: provider_to_domain(provider),
    })
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, new: NewBooking) -> DomainResult<Booking> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Write first so the transaction holds the write lock before it reads.
        let model = booking::ActiveModel {
            customer_id: Set(new.customer_id),
            provider_id: Set(new.provider_id),
            booking_date: Set(new.booking_date),
            ..Default::default()
        };
        let saved = model.insert(&txn).await.map_err(|e| {
            if unique_violation(&e).is_some() {
                debug!(
                    provider_id = new.provider_id,
                    date = %new.booking_date,
                    "Slot taken at insert"
                );
                DomainError::AlreadyBooked
            } else {
                db_err(e)
            }
        })?;

        let still_offered = availability::Entity::find()
            .filter(availability::Column::ProviderId.eq(saved.provider_id))
            .filter(availability::Column::Date.eq(saved.booking_date))
            .count(&txn)
            .await
            .map_err(db_err)?
            > 0;
        if !still_offered {
            warn!(
                provider_id = saved.provider_id,
                date = %saved.booking_date,
                "Availability withdrawn before booking committed"
            );
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::UnavailableDate);
        }

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_slot(
        &self,
        provider_id: i32,
        date: NaiveDate,
    ) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::ProviderId.eq(provider_id))
            .filter(booking::Column::BookingDate.eq(date))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn cancel_for_customer(
        &self,
        id: i32,
        customer_id: &str,
    ) -> DomainResult<BookingWithProvider> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let found = booking::Entity::find_by_id(id)
            .find_also_related(provider::Entity)
            .one(&txn)
            .await
            .map_err(db_err)?;

        let Some(pair) = found else {
            return Err(DomainError::not_found("Booking", "id", id));
        };
        let cancelled = with_provider(pair)?;
        if !cancelled.booking.is_owned_by(customer_id) {
            return Err(DomainError::Forbidden(
                "You can only cancel your own bookings.".into(),
            ));
        }

        booking::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(cancelled)
    }

    async fn list_for_customer(&self, customer_id: &str) -> DomainResult<Vec<BookingWithProvider>> {
        let rows = booking::Entity::find()
            .filter(booking::Column::CustomerId.eq(customer_id))
            .order_by_desc(booking::Column::BookingDate)
            .order_by_desc(booking::Column::Id)
            .find_also_related(provider::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        rows.into_iter().map(with_provider).collect()
    }
}
