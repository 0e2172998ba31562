//! Runtime settings assembled from environment variables and static defaults.
//!
//! Settings are built once at startup by [`Settings::load`] and passed by
//! reference to whatever needs them. Missing optional integrations never fail
//! loading: they are logged and kept in [`Settings::warnings`]. Only values
//! that are present but unparseable are errors.

pub mod cache;
pub mod constants;
mod env;
pub mod framework;
pub mod integrations;
pub mod logging;
pub mod metadata;
mod secret;
mod warnings;

use serde::Serialize;

pub use cache::{CacheBackend, CacheBackendKind, CacheSettings};
pub use env::{EnvSource, ProcessEnv};
pub use framework::{
    AccountSettings, AdminInitSettings, AuthenticationMethod, CorsSettings, EmailVerification,
    LocaleSettings, RestAuthSettings, RestFrameworkSettings, StaticFilesSettings,
    SwaggerSettings, TemplateBackend,
};
pub use integrations::{AnalyticsSettings, ChargebeeSettings, EmailSettings, InvitationEmail};
pub use logging::LoggingSettings;
pub use metadata::{Ec2InstanceMetadata, InstanceMetadata, MetadataError};
pub use secret::{generate_secret_key, SecretKey};
pub use warnings::ConfigWarning;

#[cfg(any(test, feature = "test-utils"))]
pub use metadata::MockInstanceMetadata;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use constants::*;

/// Application settings.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    #[serde(skip_serializing)]
    secret_key: SecretKey,
    pub hosted_seats_limit: u32,
    pub analytics: AnalyticsSettings,
    /// Host names this instance answers to
    pub allowed_hosts: Vec<String>,
    pub internal_ips: Vec<String>,
    pub installed_apps: Vec<String>,
    pub site_id: u32,
    pub database: DatabaseConfig,
    pub rest_framework: RestFrameworkSettings,
    pub rest_auth: RestAuthSettings,
    pub middleware: Vec<String>,
    pub root_urlconf: String,
    pub wsgi_application: String,
    pub templates: Vec<TemplateBackend>,
    pub password_validators: Vec<String>,
    pub locale: LocaleSettings,
    pub static_files: StaticFilesSettings,
    pub cors: CorsSettings,
    pub email: EmailSettings,
    pub admin: AdminInitSettings,
    pub accounts: AccountSettings,
    pub swagger: SwaggerSettings,
    pub login_url: String,
    pub logout_url: String,
    pub fe_e2e_test_user_email: String,
    pub secure_proxy_ssl_header: (String, String),
    pub chargebee: ChargebeeSettings,
    pub logging: LoggingSettings,
    pub caches: CacheSettings,
    warnings: Vec<ConfigWarning>,
}

impl Settings {
    /// Load settings from the process environment (and `.env`), looking up
    /// the instance address from the metadata endpoint.
    pub async fn from_env() -> AppResult<Self> {
        let env = ProcessEnv::load();
        let url = env
            .non_empty(ENV_INSTANCE_METADATA_URL)
            .unwrap_or_else(|| DEFAULT_INSTANCE_METADATA_URL.to_string());
        let metadata = Ec2InstanceMetadata::new(url).map_err(|e| {
            AppError::internal(format!("Failed to build metadata client: {}", e))
        })?;
        Self::load(&env, &metadata).await
    }

    /// Assemble settings from `env`, asking `metadata` for the instance's
    /// private address.
    pub async fn load<E, M>(env: &E, metadata: &M) -> AppResult<Self>
    where
        E: EnvSource + ?Sized,
        M: InstanceMetadata + ?Sized,
    {
        let mut warnings = Vec::new();

        let secret_key = match env.non_empty(ENV_SECRET_KEY) {
            Some(key) => SecretKey::new(key),
            None => {
                warnings.push(ConfigWarning::GeneratedSecretKey);
                SecretKey::generate()
            }
        };

        let hosted_seats_limit = env.parse_or(ENV_HOSTED_SEATS_LIMIT, 0u32)?;

        let analytics = AnalyticsSettings {
            google_analytics_key: env.non_empty(ENV_GOOGLE_ANALYTICS_KEY),
            google_service_account: env.non_empty(ENV_GOOGLE_SERVICE_ACCOUNT),
            ga_table_id: env.non_empty(ENV_GA_TABLE_ID),
        };
        if analytics.google_service_account.is_none() {
            warnings.push(ConfigWarning::MissingGoogleServiceAccount);
        }
        if analytics.ga_table_id.is_none() {
            warnings.push(ConfigWarning::MissingGaTableId);
        }

        let mut allowed_hosts = env.list(ENV_ALLOWED_HOSTS);
        match metadata.local_ipv4().await {
            Ok(ip) => {
                tracing::debug!(%ip, "Adding instance address to allowed hosts");
                if !allowed_hosts.contains(&ip) {
                    allowed_hosts.push(ip);
                }
            }
            Err(MetadataError::Unreachable(reason)) => {
                tracing::debug!(%reason, "Instance metadata unavailable");
            }
            Err(e) => warnings.push(ConfigWarning::InstanceAddressIgnored(e.to_string())),
        }

        let mut installed_apps: Vec<String> =
            INSTALLED_APPS.iter().map(|s| s.to_string()).collect();
        let mut middleware: Vec<String> = MIDDLEWARE.iter().map(|s| s.to_string()).collect();
        if analytics.is_enabled() {
            installed_apps.push(ANALYTICS_APP.to_string());
            middleware.push(ANALYTICS_MIDDLEWARE.to_string());
        }

        let email = EmailSettings::new(env.non_empty(ENV_SENDGRID_API_KEY));
        if !email.delivery_enabled() {
            warnings.push(ConfigWarning::MissingSendgridApiKey);
        }

        let chargebee = ChargebeeSettings {
            enabled: env.flag(ENV_ENABLE_CHARGEBEE)?,
            api_key: env.non_empty(ENV_CHARGEBEE_API_KEY),
            site: env.non_empty(ENV_CHARGEBEE_SITE),
        };
        if chargebee.is_incomplete() {
            warnings.push(ConfigWarning::IncompleteChargebeeCredentials);
        }

        let caches = CacheSettings::new(env.parse_or(ENV_CACHE_FLAGS_SECONDS, 0u64)?);

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        Ok(Self {
            secret_key,
            hosted_seats_limit,
            analytics,
            allowed_hosts,
            internal_ips: INTERNAL_IPS.iter().map(|s| s.to_string()).collect(),
            installed_apps,
            site_id: SITE_ID,
            database: DatabaseConfig::from_source(env),
            rest_framework: RestFrameworkSettings::default(),
            rest_auth: RestAuthSettings::default(),
            middleware,
            root_urlconf: ROOT_URLCONF.to_string(),
            wsgi_application: WSGI_APPLICATION.to_string(),
            templates: vec![TemplateBackend::default()],
            password_validators: framework::password_validators(),
            locale: LocaleSettings::default(),
            static_files: StaticFilesSettings::new("."),
            cors: CorsSettings::default(),
            email,
            admin: AdminInitSettings::default(),
            accounts: AccountSettings::default(),
            swagger: SwaggerSettings::default(),
            login_url: LOGIN_URL.to_string(),
            logout_url: LOGOUT_URL.to_string(),
            fe_e2e_test_user_email: FE_E2E_TEST_USER_EMAIL.to_string(),
            secure_proxy_ssl_header: (
                SECURE_PROXY_SSL_HEADER.0.to_string(),
                SECURE_PROXY_SSL_HEADER.1.to_string(),
            ),
            chargebee,
            logging: LoggingSettings::default(),
            caches,
            warnings,
        })
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Non-fatal problems found while loading, in the order they were found.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn analytics_enabled(&self) -> bool {
        self.analytics.is_enabled()
    }

    /// Whether `host` is on the allow-list.
    pub fn is_allowed_host(&self, host: &str) -> bool {
        self.allowed_hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn full_env() -> HashMap<&'static str, &'static str> {
        [
            (ENV_SECRET_KEY, "test-secret"),
            (ENV_GOOGLE_SERVICE_ACCOUNT, "svc-account-credentials"),
            (ENV_GA_TABLE_ID, "ga:12345"),
            (ENV_SENDGRID_API_KEY, "SG.key"),
        ]
        .into_iter()
        .collect()
    }

    fn unreachable() -> MockInstanceMetadata {
        let mut metadata = MockInstanceMetadata::new();
        metadata
            .expect_local_ipv4()
            .times(1)
            .returning(|| Err(MetadataError::Unreachable("connection refused".to_string())));
        metadata
    }

    #[tokio::test]
    async fn test_fully_configured_has_no_warnings() {
        let settings = Settings::load(&full_env(), &unreachable()).await.unwrap();

        assert!(settings.warnings().is_empty());
        assert_eq!(settings.secret_key().expose(), "test-secret");
        assert_eq!(settings.hosted_seats_limit, 0);
        assert_eq!(settings.caches.flags_ttl_seconds, 0);
        assert!(!settings.chargebee.enabled);
    }

    #[tokio::test]
    async fn test_instance_address_appended() {
        let mut env = full_env();
        env.insert(ENV_ALLOWED_HOSTS, "api.bullet-train.io");

        let mut metadata = MockInstanceMetadata::new();
        metadata
            .expect_local_ipv4()
            .returning(|| Ok("10.0.4.17".to_string()));

        let settings = Settings::load(&env, &metadata).await.unwrap();

        assert_eq!(settings.allowed_hosts, vec!["api.bullet-train.io", "10.0.4.17"]);
        assert_eq!(settings.internal_ips, vec!["127.0.0.1"]);
    }

    #[tokio::test]
    async fn test_instance_address_not_duplicated() {
        let mut env = full_env();
        env.insert(ENV_ALLOWED_HOSTS, "10.0.4.17");

        let mut metadata = MockInstanceMetadata::new();
        metadata
            .expect_local_ipv4()
            .returning(|| Ok("10.0.4.17".to_string()));

        let settings = Settings::load(&env, &metadata).await.unwrap();
        assert_eq!(settings.allowed_hosts, vec!["10.0.4.17"]);
    }

    #[tokio::test]
    async fn test_bad_metadata_response_warns_and_leaves_hosts() {
        let mut env = full_env();
        env.insert(ENV_ALLOWED_HOSTS, "a.example.com");

        let mut metadata = MockInstanceMetadata::new();
        metadata
            .expect_local_ipv4()
            .returning(|| Err(MetadataError::UnexpectedStatus(404)));

        let settings = Settings::load(&env, &metadata).await.unwrap();

        assert_eq!(settings.allowed_hosts, vec!["a.example.com"]);
        assert!(matches!(
            settings.warnings(),
            [ConfigWarning::InstanceAddressIgnored(_)]
        ));
    }

    #[tokio::test]
    async fn test_invalid_seat_limit_fails() {
        let mut env = full_env();
        env.insert(ENV_HOSTED_SEATS_LIMIT, "-3");

        let err = Settings::load(&env, &unreachable()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidSetting { name: ENV_HOSTED_SEATS_LIMIT, .. }
        ));
    }

    #[tokio::test]
    async fn test_chargebee_enabled_without_credentials_warns() {
        let mut env = full_env();
        env.insert(ENV_ENABLE_CHARGEBEE, "true");
        env.insert(ENV_CHARGEBEE_SITE, "bullettrain-test");

        let settings = Settings::load(&env, &unreachable()).await.unwrap();

        assert!(settings.chargebee.enabled);
        assert_eq!(
            settings.warnings(),
            &[ConfigWarning::IncompleteChargebeeCredentials]
        );
    }

    #[tokio::test]
    async fn test_serialized_settings_hide_secrets() {
        let mut env = full_env();
        env.insert(ENV_CHARGEBEE_API_KEY, "cb-live-key");
        env.insert(ENV_GOOGLE_ANALYTICS_KEY, "UA-000000-1");

        let settings = Settings::load(&env, &unreachable()).await.unwrap();
        let json = serde_json::to_string(&settings).unwrap();

        for secret in [
            "test-secret",
            "SG.key",
            "cb-live-key",
            "UA-000000-1",
            "svc-account-credentials",
        ] {
            assert!(!json.contains(secret), "{} leaked", secret);
        }
        assert!(!format!("{:?}", settings).contains("test-secret"));
    }
}
