//! Third-party integration settings: analytics, email delivery, billing.

use serde::Serialize;

use super::constants::{
    DEFAULT_FROM_EMAIL, EMAIL_BACKEND, INVITE_FROM_EMAIL, INVITE_SUBJECT_WITHOUT_NAME,
    INVITE_SUBJECT_WITH_NAME,
};

/// Google Analytics integration.
#[derive(Clone, Default, Serialize)]
pub struct AnalyticsSettings {
    /// Tracking key; enables the analytics app and middleware when present
    #[serde(skip_serializing)]
    pub google_analytics_key: Option<String>,
    /// Service account used to query organisation usage
    #[serde(skip_serializing)]
    pub google_service_account: Option<String>,
    pub ga_table_id: Option<String>,
}

impl AnalyticsSettings {
    pub fn is_enabled(&self) -> bool {
        self.google_analytics_key.is_some()
    }
}

impl std::fmt::Debug for AnalyticsSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsSettings")
            .field("google_analytics_key", &self.google_analytics_key.as_ref().map(|_| "[REDACTED]"))
            .field("google_service_account", &self.google_service_account.as_ref().map(|_| "[REDACTED]"))
            .field("ga_table_id", &self.ga_table_id)
            .finish()
    }
}

/// Invitation email templates.
#[derive(Debug, Clone, Serialize)]
pub struct InvitationEmail {
    pub subject_with_name: String,
    pub subject_without_name: String,
    pub from_email: String,
}

impl Default for InvitationEmail {
    fn default() -> Self {
        Self {
            subject_with_name: INVITE_SUBJECT_WITH_NAME.to_string(),
            subject_without_name: INVITE_SUBJECT_WITHOUT_NAME.to_string(),
            from_email: INVITE_FROM_EMAIL.to_string(),
        }
    }
}

impl InvitationEmail {
    /// Render the invitation subject line.
    pub fn subject(&self, inviter: Option<&str>, organisation: &str) -> String {
        match inviter.filter(|name| !name.trim().is_empty()) {
            Some(name) => render(
                &self.subject_with_name,
                &[("{inviter}", name), ("{organisation}", organisation)],
            ),
            None => render(&self.subject_without_name, &[("{organisation}", organisation)]),
        }
    }
}

/// Substitute placeholders in a single pass over `template`. Substituted
/// values are copied as-is and never scanned for further placeholders.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Outgoing email settings.
#[derive(Clone, Serialize)]
pub struct EmailSettings {
    pub default_from_email: String,
    pub backend: String,
    #[serde(skip_serializing)]
    pub sendgrid_api_key: Option<String>,
    pub invitations: InvitationEmail,
}

impl EmailSettings {
    pub fn new(sendgrid_api_key: Option<String>) -> Self {
        Self {
            default_from_email: DEFAULT_FROM_EMAIL.to_string(),
            backend: EMAIL_BACKEND.to_string(),
            sendgrid_api_key,
            invitations: InvitationEmail::default(),
        }
    }

    /// Without a SendGrid key nothing is delivered.
    pub fn delivery_enabled(&self) -> bool {
        self.sendgrid_api_key.is_some()
    }
}

impl std::fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailSettings")
            .field("default_from_email", &self.default_from_email)
            .field("backend", &self.backend)
            .field("sendgrid_api_key", &self.sendgrid_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("invitations", &self.invitations)
            .finish()
    }
}

/// Chargebee billing integration.
#[derive(Clone, Default, Serialize)]
pub struct ChargebeeSettings {
    pub enabled: bool,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub site: Option<String>,
}

impl ChargebeeSettings {
    /// Enabled but missing either credential.
    pub fn is_incomplete(&self) -> bool {
        self.enabled && (self.api_key.is_none() || self.site.is_none())
    }
}

impl std::fmt::Debug for ChargebeeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChargebeeSettings")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("site", &self.site)
            .finish()
    }
}
