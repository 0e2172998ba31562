//! Organisation database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Organisation;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organisations_organisation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(2000))")]
    pub name: String,
    pub created_date: DateTimeUtc,
    /// Labelled "SubscriptionDate"
    pub subscription_date: Option<DateTimeUtc>,
    /// NULL for organisations created before plans were tracked
    #[sea_orm(column_type = "String(StringLen::N(20))", nullable)]
    pub plan: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Organisation {
    fn from(model: Model) -> Self {
        Organisation {
            id: model.id,
            name: model.name,
            created_date: model.created_date,
            subscription_date: model.subscription_date,
            plan: model.plan,
        }
    }
}
