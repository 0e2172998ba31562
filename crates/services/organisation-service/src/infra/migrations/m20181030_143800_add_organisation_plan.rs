//! Migration: Add plan to organisations and label the subscription date.
//!
//! `plan` is additive and nullable, so existing rows read it as NULL and no
//! data is rewritten. The subscription date change is metadata only: its
//! type and nullability stay as they are, the label is stored as a column
//! comment where the backend supports one.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

use domain::{ORGANISATION_PLAN_MAX_LENGTH, SUBSCRIPTION_DATE_LABEL};

use super::Organisations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Organisations::Table)
                    .add_column(
                        ColumnDef::new(Organisations::Plan)
                            .string_len(ORGANISATION_PLAN_MAX_LENGTH as u32)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        label_subscription_date(manager, Some(SUBSCRIPTION_DATE_LABEL)).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        label_subscription_date(manager, None).await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Organisations::Table)
                    .drop_column(Organisations::Plan)
                    .to_owned(),
            )
            .await
    }
}

/// Set (or clear) the subscription date column comment on PostgreSQL.
async fn label_subscription_date(
    manager: &SchemaManager<'_>,
    label: Option<&str>,
) -> Result<(), DbErr> {
    if manager.get_database_backend() != DbBackend::Postgres {
        tracing::debug!("Column comments unsupported on this backend, skipping label");
        return Ok(());
    }

    let comment = match label {
        Some(label) => format!("'{}'", label.replace('\'', "''")),
        None => "NULL".to_string(),
    };
    let sql = format!(
        "COMMENT ON COLUMN organisations_organisation.subscription_date IS {}",
        comment
    );

    manager.get_connection().execute_unprepared(&sql).await?;
    Ok(())
}
