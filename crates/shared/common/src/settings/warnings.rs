//! Non-fatal configuration problems found while loading settings.

use serde::Serialize;

/// A missing optional integration or an ignored startup lookup.
///
/// None of these stop the process; the affected feature is simply off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ConfigWarning {
    GeneratedSecretKey,
    MissingGoogleServiceAccount,
    MissingGaTableId,
    MissingSendgridApiKey,
    IncompleteChargebeeCredentials,
    InstanceAddressIgnored(String),
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::GeneratedSecretKey => write!(
                f,
                "DJANGO_SECRET_KEY not configured, generated a key for this process only"
            ),
            ConfigWarning::MissingGoogleServiceAccount => write!(
                f,
                "GOOGLE_SERVICE_ACCOUNT not configured, getting organisation usage will not work"
            ),
            ConfigWarning::MissingGaTableId => write!(
                f,
                "GA_TABLE_ID not configured, getting organisation usage will not work"
            ),
            ConfigWarning::MissingSendgridApiKey => write!(
                f,
                "`SENDGRID_API_KEY` has not been configured. You will not receive emails."
            ),
            ConfigWarning::IncompleteChargebeeCredentials => write!(
                f,
                "ENABLE_CHARGEBEE is set but CHARGEBEE_API_KEY or CHARGEBEE_SITE is missing"
            ),
            ConfigWarning::InstanceAddressIgnored(reason) => {
                write!(f, "instance address not added to ALLOWED_HOSTS: {}", reason)
            }
        }
    }
}
