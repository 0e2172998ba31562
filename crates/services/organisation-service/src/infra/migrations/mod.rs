//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{HHMMSS}_{description}
//! and are applied in the order listed below, each exactly once.

use sea_orm_migration::prelude::*;

mod m20181025_000001_create_organisations_table;
mod m20181030_143800_add_organisation_plan;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20181025_000001_create_organisations_table::Migration),
            Box::new(m20181030_143800_add_organisation_plan::Migration),
        ]
    }
}

#[derive(Iden)]
pub(crate) enum Organisations {
    #[iden = "organisations_organisation"]
    Table,
    Id,
    Name,
    CreatedDate,
    SubscriptionDate,
    Plan,
}
