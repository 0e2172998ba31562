//! Settings loading tests.
//!
//! These tests assemble settings from fixed environment maps and stub
//! metadata services, without touching the process environment or network.

use std::collections::HashMap;

use async_trait::async_trait;

use common::settings::constants::{ANALYTICS_APP, ANALYTICS_MIDDLEWARE, INSTALLED_APPS, MIDDLEWARE};
use common::settings::{InstanceMetadata, MetadataError};
use common::{ConfigWarning, Settings};

// =============================================================================
// Stub metadata services
// =============================================================================

/// Metadata service that is not there (local machine, CI)
struct NoMetadataService;

#[async_trait]
impl InstanceMetadata for NoMetadataService {
    async fn local_ipv4(&self) -> Result<String, MetadataError> {
        Err(MetadataError::Unreachable("Name or service not known".to_string()))
    }
}

/// Metadata service answering with a fixed address
struct FixedAddress(&'static str);

#[async_trait]
impl InstanceMetadata for FixedAddress {
    async fn local_ipv4(&self) -> Result<String, MetadataError> {
        Ok(self.0.to_string())
    }
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Optional integrations
// =============================================================================

#[tokio::test]
async fn test_analytics_key_unset_registers_nothing_and_does_not_warn() {
    let env = env(&[
        ("DJANGO_SECRET_KEY", "s3cret"),
        ("GOOGLE_SERVICE_ACCOUNT", "svc"),
        ("GA_TABLE_ID", "ga:1"),
        ("SENDGRID_API_KEY", "SG.x"),
    ]);

    let settings = Settings::load(&env, &NoMetadataService).await.unwrap();

    assert!(!settings.analytics_enabled());
    assert_eq!(settings.installed_apps.len(), INSTALLED_APPS.len());
    assert!(!settings.installed_apps.iter().any(|a| a == ANALYTICS_APP));
    assert_eq!(settings.middleware.len(), MIDDLEWARE.len());
    assert!(!settings.middleware.iter().any(|m| m == ANALYTICS_MIDDLEWARE));
    assert!(settings.warnings().is_empty());
}

#[tokio::test]
async fn test_analytics_key_set_appends_app_and_middleware_last() {
    let env = env(&[
        ("DJANGO_SECRET_KEY", "s3cret"),
        ("GOOGLE_ANALYTICS_KEY", "UA-1234-1"),
    ]);

    let settings = Settings::load(&env, &NoMetadataService).await.unwrap();

    assert!(settings.analytics_enabled());
    assert_eq!(settings.installed_apps.last().map(String::as_str), Some(ANALYTICS_APP));
    assert_eq!(
        settings.middleware.last().map(String::as_str),
        Some(ANALYTICS_MIDDLEWARE)
    );
}

#[tokio::test]
async fn test_missing_integrations_warn_independently() {
    let cases: [(&[(&str, &str)], &[ConfigWarning]); 4] = [
        (
            &[("GA_TABLE_ID", "ga:1"), ("SENDGRID_API_KEY", "SG.x")],
            &[ConfigWarning::MissingGoogleServiceAccount],
        ),
        (
            &[("GOOGLE_SERVICE_ACCOUNT", "svc"), ("SENDGRID_API_KEY", "SG.x")],
            &[ConfigWarning::MissingGaTableId],
        ),
        (
            &[("GOOGLE_SERVICE_ACCOUNT", "svc"), ("GA_TABLE_ID", "ga:1")],
            &[ConfigWarning::MissingSendgridApiKey],
        ),
        (
            &[],
            &[
                ConfigWarning::MissingGoogleServiceAccount,
                ConfigWarning::MissingGaTableId,
                ConfigWarning::MissingSendgridApiKey,
            ],
        ),
    ];

    for (pairs, expected) in cases {
        let mut env = env(pairs);
        env.insert("DJANGO_SECRET_KEY".to_string(), "s3cret".to_string());

        let settings = Settings::load(&env, &NoMetadataService).await.unwrap();
        assert_eq!(settings.warnings(), expected, "env: {:?}", pairs);
    }
}

#[tokio::test]
async fn test_empty_values_count_as_missing() {
    let env = env(&[
        ("DJANGO_SECRET_KEY", "s3cret"),
        ("GOOGLE_ANALYTICS_KEY", ""),
        ("GOOGLE_SERVICE_ACCOUNT", ""),
        ("GA_TABLE_ID", "ga:1"),
        ("SENDGRID_API_KEY", "SG.x"),
    ]);

    let settings = Settings::load(&env, &NoMetadataService).await.unwrap();

    assert!(!settings.analytics_enabled());
    assert_eq!(settings.warnings(), &[ConfigWarning::MissingGoogleServiceAccount]);
}

#[tokio::test]
async fn test_missing_secret_key_is_generated() {
    let env = env(&[]);

    let first = Settings::load(&env, &NoMetadataService).await.unwrap();
    let second = Settings::load(&env, &NoMetadataService).await.unwrap();

    assert!(first.warnings().contains(&ConfigWarning::GeneratedSecretKey));
    assert_eq!(first.secret_key().expose().len(), 50);
    assert_ne!(first.secret_key(), second.secret_key());
}

// =============================================================================
// Allow-list
// =============================================================================

#[tokio::test]
async fn test_unreachable_metadata_leaves_allow_list_as_configured() {
    let env = env(&[
        ("DJANGO_SECRET_KEY", "s3cret"),
        ("DJANGO_ALLOWED_HOSTS", "api.bullet-train.io,app.bullet-train.io"),
    ]);

    let settings = Settings::load(&env, &NoMetadataService).await.unwrap();

    assert_eq!(
        settings.allowed_hosts,
        vec!["api.bullet-train.io", "app.bullet-train.io"]
    );
    assert_eq!(settings.internal_ips, vec!["127.0.0.1"]);
    assert!(!settings
        .warnings()
        .iter()
        .any(|w| matches!(w, ConfigWarning::InstanceAddressIgnored(_))));
}

#[tokio::test]
async fn test_unset_allowed_hosts_is_empty() {
    let env = env(&[("DJANGO_SECRET_KEY", "s3cret")]);

    let settings = Settings::load(&env, &NoMetadataService).await.unwrap();

    assert!(settings.allowed_hosts.is_empty());
}

#[tokio::test]
async fn test_instance_address_registered() {
    let env = env(&[
        ("DJANGO_SECRET_KEY", "s3cret"),
        ("DJANGO_ALLOWED_HOSTS", "api.bullet-train.io"),
    ]);

    let settings = Settings::load(&env, &FixedAddress("172.31.9.4"))
        .await
        .unwrap();

    assert_eq!(settings.allowed_hosts, vec!["api.bullet-train.io", "172.31.9.4"]);
    assert!(settings.is_allowed_host("172.31.9.4"));
    assert!(settings.is_allowed_host("API.bullet-train.io"));
    assert_eq!(settings.internal_ips, vec!["127.0.0.1"]);
}

// =============================================================================
// Static sections
// =============================================================================

#[tokio::test]
async fn test_static_defaults() {
    let env = env(&[("DJANGO_SECRET_KEY", "s3cret"), ("CACHE_FLAGS_SECONDS", "60")]);

    let settings = Settings::load(&env, &NoMetadataService).await.unwrap();

    assert_eq!(settings.rest_framework.page_size, 10);
    assert!(!settings.rest_framework.unicode_json);
    assert_eq!(settings.site_id, 1);
    assert_eq!(settings.locale.time_zone, "UTC");
    assert!(settings.cors.origin_allow_all);
    assert!(settings.cors.allows_header("X-Environment-Key"));
    assert_eq!(settings.accounts.auth_user_model, "users.FFAdminUser");
    assert_eq!(settings.email.default_from_email, "noreply@bullet-train.io");
    assert_eq!(settings.password_validators.len(), 4);
    assert_eq!(settings.caches.flags_ttl_seconds, 60);
    assert!(settings.caches.flags_cache_enabled());
    assert_eq!(settings.caches.environment_flags.location, "environment-flags");
    assert_eq!(settings.caches.environment_objects.location, "environment-objects");
}

#[tokio::test]
async fn test_invalid_cache_seconds_is_an_error() {
    let env = env(&[("DJANGO_SECRET_KEY", "s3cret"), ("CACHE_FLAGS_SECONDS", "soon")]);

    let result = Settings::load(&env, &NoMetadataService).await;

    assert!(result.is_err());
}
