//! Shared configuration structures.

use serde::{Deserialize, Serialize};

use crate::settings::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_MIN_CONNECTIONS, DEFAULT_DATABASE_URL,
    ENV_DATABASE_URL,
};
use crate::settings::EnvSource;

/// Database configuration.
///
/// Populated per deployment environment; the common settings only provide
/// development defaults.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing)]
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            min_connections: DEFAULT_DATABASE_MIN_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Build from `DATABASE_URL`, falling back to the development default.
    pub fn from_source<E: EnvSource + ?Sized>(env: &E) -> Self {
        Self {
            url: env
                .non_empty(ENV_DATABASE_URL)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            ..Self::default()
        }
    }

    /// Config for a single-connection database (tests, SQLite in-memory).
    pub fn single_connection(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}
