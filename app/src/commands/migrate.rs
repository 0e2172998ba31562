//! Migrate command - Database migration management.

use common::{AppResult, Settings};

use crate::cli::MigrateAction;

/// Execute the migrate command
pub async fn execute(action: MigrateAction, settings: &Settings) -> AppResult<()> {
    tracing::info!(?action, "Running migration command...");
    organisation_service_lib::run_migrations(action.into(), &settings.database).await
}
