//! Web framework settings: REST defaults, templates, CORS, accounts.

use std::path::PathBuf;

use serde::Serialize;

use super::constants::{
    ADMIN_EMAIL, ADMIN_INITIAL_PASSWORD, AUTH_USER_MODEL, DEFAULT_CORS_HEADERS,
    HEADER_E2E_TEST_AUTH_TOKEN, HEADER_ENVIRONMENT_KEY, LANGUAGE_CODE, PASSWORD_VALIDATORS,
    REGISTER_SERIALIZER, REST_AUTHENTICATION_TOKEN, REST_PAGE_SIZE, REST_PAGINATION_PAGE_NUMBER,
    REST_PERMISSION_IS_AUTHENTICATED, STATIC_DIR, STATIC_URL, TEMPLATE_BACKEND,
    TEMPLATE_CONTEXT_PROCESSORS, TIME_ZONE, USER_DETAILS_SERIALIZER,
};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// REST API defaults.
#[derive(Debug, Clone, Serialize)]
pub struct RestFrameworkSettings {
    pub default_permission_classes: Vec<String>,
    pub default_authentication_classes: Vec<String>,
    pub page_size: u32,
    pub unicode_json: bool,
    pub default_pagination_class: String,
}

impl Default for RestFrameworkSettings {
    fn default() -> Self {
        Self {
            default_permission_classes: owned(&[REST_PERMISSION_IS_AUTHENTICATED]),
            default_authentication_classes: owned(&[REST_AUTHENTICATION_TOKEN]),
            page_size: REST_PAGE_SIZE,
            unicode_json: false,
            default_pagination_class: REST_PAGINATION_PAGE_NUMBER.to_string(),
        }
    }
}

/// Serializers used by the registration and user-details endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct RestAuthSettings {
    pub register_serializer: String,
    pub user_details_serializer: String,
}

impl Default for RestAuthSettings {
    fn default() -> Self {
        Self {
            register_serializer: REGISTER_SERIALIZER.to_string(),
            user_details_serializer: USER_DETAILS_SERIALIZER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateBackend {
    pub backend: String,
    pub dirs: Vec<PathBuf>,
    pub app_dirs: bool,
    pub context_processors: Vec<String>,
}

impl Default for TemplateBackend {
    fn default() -> Self {
        Self {
            backend: TEMPLATE_BACKEND.to_string(),
            dirs: Vec::new(),
            app_dirs: true,
            context_processors: owned(TEMPLATE_CONTEXT_PROCESSORS),
        }
    }
}

pub fn password_validators() -> Vec<String> {
    owned(PASSWORD_VALIDATORS)
}

#[derive(Debug, Clone, Serialize)]
pub struct LocaleSettings {
    pub language_code: String,
    pub time_zone: String,
    pub use_i18n: bool,
    pub use_l10n: bool,
    pub use_tz: bool,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            language_code: LANGUAGE_CODE.to_string(),
            time_zone: TIME_ZONE.to_string(),
            use_i18n: true,
            use_l10n: true,
            use_tz: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticFilesSettings {
    pub url: String,
    pub root: PathBuf,
}

impl StaticFilesSettings {
    /// Static files are collected under `<project_root>/static/`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            url: STATIC_URL.to_string(),
            root: project_root.into().join(STATIC_DIR),
        }
    }
}

/// Cross-origin resource sharing.
#[derive(Debug, Clone, Serialize)]
pub struct CorsSettings {
    pub origin_allow_all: bool,
    pub allow_headers: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        let mut allow_headers = owned(DEFAULT_CORS_HEADERS);
        allow_headers.push(HEADER_ENVIRONMENT_KEY.to_string());
        allow_headers.push(HEADER_E2E_TEST_AUTH_TOKEN.to_string());
        Self {
            origin_allow_all: true,
            allow_headers,
        }
    }
}

impl CorsSettings {
    /// Header names compare case-insensitively.
    pub fn allows_header(&self, name: &str) -> bool {
        self.allow_headers.iter().any(|h| h.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationMethod {
    Username,
    Email,
    UsernameEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailVerification {
    Mandatory,
    Optional,
    None,
}

/// Account registration rules.
#[derive(Debug, Clone, Serialize)]
pub struct AccountSettings {
    pub auth_user_model: String,
    pub username_required: bool,
    pub email_required: bool,
    pub authentication_method: AuthenticationMethod,
    pub email_verification: EmailVerification,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            auth_user_model: AUTH_USER_MODEL.to_string(),
            username_required: false,
            email_required: true,
            authentication_method: AuthenticationMethod::Email,
            email_verification: EmailVerification::None,
        }
    }
}

/// First admin user, created through the init URL.
#[derive(Clone, Serialize)]
pub struct AdminInitSettings {
    pub allow_initiation_via_url: bool,
    pub email: String,
    #[serde(skip_serializing)]
    pub initial_password: String,
}

impl Default for AdminInitSettings {
    fn default() -> Self {
        Self {
            allow_initiation_via_url: true,
            email: ADMIN_EMAIL.to_string(),
            initial_password: ADMIN_INITIAL_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for AdminInitSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminInitSettings")
            .field("allow_initiation_via_url", &self.allow_initiation_via_url)
            .field("email", &self.email)
            .field("initial_password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiKeySecurityDefinition {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ApiKeyLocation,
    pub parameter: String,
}

/// API documentation UI.
#[derive(Debug, Clone, Serialize)]
pub struct SwaggerSettings {
    pub show_request_headers: bool,
    pub security_definitions: Vec<ApiKeySecurityDefinition>,
}

impl Default for SwaggerSettings {
    fn default() -> Self {
        Self {
            show_request_headers: true,
            security_definitions: vec![ApiKeySecurityDefinition {
                name: "api_key".to_string(),
                location: ApiKeyLocation::Header,
                parameter: "Authorization".to_string(),
            }],
        }
    }
}
