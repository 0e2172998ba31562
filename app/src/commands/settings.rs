//! Settings command - Inspect the loaded runtime settings.

use common::{AppError, AppResult, Settings};

use crate::cli::SettingsAction;

/// Execute the settings command
pub fn execute(action: SettingsAction, settings: &Settings) -> AppResult<()> {
    match action {
        SettingsAction::Check => {
            // Warnings were already logged while loading
            let count = settings.warnings().len();
            if count == 0 {
                tracing::info!("Settings loaded without warnings");
            } else {
                tracing::info!(warnings = count, "Settings loaded with warnings");
            }
            tracing::info!(
                allowed_hosts = ?settings.allowed_hosts,
                analytics = settings.analytics_enabled(),
                email = settings.email.delivery_enabled(),
                chargebee = settings.chargebee.enabled,
                flags_cache_seconds = settings.caches.flags_ttl_seconds,
                "Effective configuration"
            );
        }
        SettingsAction::Show { json: true } => {
            let rendered = serde_json::to_string_pretty(settings)
                .map_err(|e| AppError::internal(format!("Failed to render settings: {}", e)))?;
            println!("{}", rendered);
        }
        SettingsAction::Show { json: false } => {
            println!("{:#?}", settings);
        }
    }

    Ok(())
}
