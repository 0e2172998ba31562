//! Organisation repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::organisation::{self, ActiveModel, Entity as OrganisationEntity};
use common::{AppError, AppResult, OptionExt};
use domain::organisation::validate_plan;
use domain::{CreateOrganisation, Organisation};

/// Organisation repository trait for dependency injection.
#[async_trait]
pub trait OrganisationRepository: Send + Sync {
    /// Find organisation by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Organisation>>;

    /// List all organisations, oldest first
    async fn list(&self) -> AppResult<Vec<Organisation>>;

    /// Create a new organisation
    async fn create(&self, input: CreateOrganisation) -> AppResult<Organisation>;

    /// Replace the organisation's plan (`None` clears it)
    async fn update_plan(&self, id: i32, plan: Option<String>) -> AppResult<Organisation>;
}

/// Concrete implementation of OrganisationRepository
pub struct OrganisationStore {
    db: DatabaseConnection,
}

impl OrganisationStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrganisationRepository for OrganisationStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Organisation>> {
        let result = OrganisationEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Organisation::from))
    }

    async fn list(&self) -> AppResult<Vec<Organisation>> {
        let models = OrganisationEntity::find()
            .order_by_asc(organisation::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Organisation::from).collect())
    }

    async fn create(&self, input: CreateOrganisation) -> AppResult<Organisation> {
        input.validate()?;

        let active_model = ActiveModel {
            name: Set(input.name.trim().to_string()),
            created_date: Set(chrono::Utc::now()),
            subscription_date: Set(None),
            plan: Set(validate_plan(input.plan)?),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        tracing::info!(organisation_id = model.id, "Organisation created");
        Ok(Organisation::from(model))
    }

    async fn update_plan(&self, id: i32, plan: Option<String>) -> AppResult<Organisation> {
        let plan = validate_plan(plan)?;

        let organisation = OrganisationEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = organisation.into();
        active.plan = Set(plan);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Organisation::from(model))
    }
}
