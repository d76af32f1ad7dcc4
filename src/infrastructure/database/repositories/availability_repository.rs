//! SeaORM implementation of AvailabilityRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use super::{db_err, unique_violation};
use crate::domain::{Availability, AvailabilityRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::availability;
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmAvailabilityRepository {
    db: DatabaseConnection,
}

impl SeaOrmAvailabilityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: availability::Model) -> Availability {
    Availability {
        id: m.id,
        provider_id: m.provider_id,
        date: m.date,
    }
}

#[async_trait]
impl AvailabilityRepository for SeaOrmAvailabilityRepository {
    async fn insert(&self, provider_id: i32, date: NaiveDate) -> DomainResult<Availability> {
        let model = availability::ActiveModel {
            provider_id: Set(provider_id),
            date: Set(date),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(|e| {
            if unique_violation(&e).is_some() {
                DomainError::Duplicate(format!("Availability for {} already exists.", date))
            } else {
                db_err(e)
            }
        })?;
        debug!(provider_id, %date, "Availability added");
        Ok(model_to_domain(saved))
    }

    async fn exists(&self, provider_id: i32, date: NaiveDate) -> DomainResult<bool> {
        let count = availability::Entity::find()
            .filter(availability::Column::ProviderId.eq(provider_id))
            .filter(availability::Column::Date.eq(date))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn delete_for_provider(
        &self,
        provider_id: i32,
        availability_id: i32,
    ) -> DomainResult<Availability> {
        let existing = availability::Entity::find_by_id(availability_id)
            .filter(availability::Column::ProviderId.eq(provider_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found(
                "Availability",
                "id",
                availability_id,
            ));
        };

        let result = availability::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        // Lost a race with another delete of the same row
        if result.rows_affected == 0 {
            return Err(DomainError::not_found(
                "Availability",
                "id",
                availability_id,
            ));
        }
        Ok(model_to_domain(existing))
    }

    async fn clear_for_provider(&self, provider_id: i32) -> DomainResult<u64> {
        let result = availability::Entity::delete_many()
            .filter(availability::Column::ProviderId.eq(provider_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected)
    }

    async fn list_for_provider(
        &self,
        provider_id: i32,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Availability>> {
        let query = availability::Entity::find()
            .filter(availability::Column::ProviderId.eq(provider_id))
            .order_by_asc(availability::Column::Date);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let page = params.effective_page(total);

        let models = query
            .offset(params.offset(total))
            .limit(params.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page, params.limit))
    }

    async fn dates_from(&self, provider_id: i32, from: NaiveDate) -> DomainResult<Vec<NaiveDate>> {
        let models = availability::Entity::find()
            .filter(availability::Column::ProviderId.eq(provider_id))
            .filter(availability::Column::Date.gte(from))
            .order_by_asc(availability::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(|m| m.date).collect())
    }
}
