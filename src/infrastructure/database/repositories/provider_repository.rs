//! SeaORM implementation of ProviderRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info};

use super::db_err;
use crate::domain::{
    Category, DomainError, DomainResult, Provider, ProviderFilter, ProviderProfile,
    ProviderRepository,
};
use crate::infrastructure::database::entities::provider;
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmProviderRepository {
    db: DatabaseConnection,
}

impl SeaOrmProviderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> DomainResult<provider::Model> {
        provider::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Provider", "id", id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn category_to_domain(c: provider::Category) -> Category {
    match c {
        provider::Category::Solar => Category::Solar,
        provider::Category::Insulation => Category::Insulation,
        provider::Category::Compost => Category::Compost,
        provider::Category::Rainwater => Category::Rainwater,
    }
}

fn category_to_entity(c: Category) -> provider::Category {
    match c {
        Category::Solar => provider::Category::Solar,
        Category::Insulation => provider::Category::Insulation,
        Category::Compost => provider::Category::Compost,
        Category::Rainwater => provider::Category::Rainwater,
    }
}

pub(crate) fn model_to_domain(m: provider::Model) -> Provider {
    Provider {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        category: category_to_domain(m.service_type),
        location: m.location,
        certification: m.certification,
        bio: m.bio,
        price_note: m.price_note,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// `%` and `_` typed by the user match literally
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ── ProviderRepository impl ─────────────────────────────────────

#[async_trait]
impl ProviderRepository for SeaOrmProviderRepository {
    async fn insert(&self, user_id: &str, profile: ProviderProfile) -> DomainResult<Provider> {
        let now = Utc::now();
        let model = provider::ActiveModel {
            user_id: Set(user_id.to_string()),
            name: Set(profile.name),
            service_type: Set(category_to_entity(profile.category)),
            location: Set(profile.location),
            certification: Set(None),
            bio: Set(profile.bio),
            price_note: Set(profile.price_note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        info!(provider_id = saved.id, name = %saved.name, "Provider saved");
        Ok(model_to_domain(saved))
    }

    async fn update(&self, id: i32, profile: ProviderProfile) -> DomainResult<Provider> {
        let existing = self.find_model(id).await?;

        let mut active: provider::ActiveModel = existing.into();
        active.name = Set(profile.name);
        active.service_type = Set(category_to_entity(profile.category));
        active.location = Set(profile.location);
        active.bio = Set(profile.bio);
        active.price_note = Set(profile.price_note);
        active.updated_at = Set(Utc::now());
        let saved = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn set_certification(
        &self,
        id: i32,
        reference: Option<String>,
    ) -> DomainResult<Provider> {
        let existing = self.find_model(id).await?;

        let mut active: provider::ActiveModel = existing.into();
        active.certification = Set(reference);
        active.updated_at = Set(Utc::now());
        let saved = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Provider>> {
        let model = provider::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_owner(&self, user_id: &str) -> DomainResult<Vec<Provider>> {
        let models = provider::Entity::find()
            .filter(provider::Column::UserId.eq(user_id))
            .order_by_desc(provider::Column::CreatedAt)
            .order_by_desc(provider::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_matching(
        &self,
        user_id: &str,
        name: &str,
        category: Category,
        location: &str,
    ) -> DomainResult<Option<Provider>> {
        let model = provider::Entity::find()
            .filter(provider::Column::UserId.eq(user_id))
            .filter(provider::Column::Name.eq(name))
            .filter(provider::Column::ServiceType.eq(category_to_entity(category)))
            .filter(provider::Column::Location.eq(location))
            .order_by_asc(provider::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = provider::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Provider", "id", id));
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &ProviderFilter,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Provider>> {
        let mut query = provider::Entity::find();

        if let Some(category) = filter.category {
            query = query.filter(provider::Column::ServiceType.eq(category_to_entity(category)));
        }

        if let Some(ref location) = filter.location {
            let pattern = format!("%{}%", escape_like(&location.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(provider::Column::Location)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        query = query
            .order_by_desc(provider::Column::CreatedAt)
            .order_by_desc(provider::Column::Id);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let page = params.effective_page(total);

        let models = query
            .offset(params.offset(total))
            .limit(params.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        debug!(total, page, "Provider listing");

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, page, params.limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("windsor"), "windsor");
    }

    #[test]
    fn category_mapping_is_total() {
        for c in Category::ALL {
            assert_eq!(category_to_domain(category_to_entity(c)), c);
        }
    }
}
