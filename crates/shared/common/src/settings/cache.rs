//! Cache backend wiring.
//!
//! Three named in-process caches: the default one, one for environment
//! objects and one for environment flags.

use serde::Serialize;

use super::constants::{DEFAULT_CACHE_LOCATION, ENVIRONMENT_CACHE_LOCATION, FLAGS_CACHE_LOCATION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackendKind {
    /// Per-process memory cache
    LocalMemory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheBackend {
    pub kind: CacheBackendKind,
    pub location: String,
}

impl CacheBackend {
    pub fn local_memory(location: impl Into<String>) -> Self {
        Self {
            kind: CacheBackendKind::LocalMemory,
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheSettings {
    /// How long evaluated flags stay cached; 0 disables flag caching
    pub flags_ttl_seconds: u64,
    pub default: CacheBackend,
    pub environment_objects: CacheBackend,
    pub environment_flags: CacheBackend,
}

impl CacheSettings {
    pub fn new(flags_ttl_seconds: u64) -> Self {
        Self {
            flags_ttl_seconds,
            default: CacheBackend::local_memory(DEFAULT_CACHE_LOCATION),
            environment_objects: CacheBackend::local_memory(ENVIRONMENT_CACHE_LOCATION),
            environment_flags: CacheBackend::local_memory(FLAGS_CACHE_LOCATION),
        }
    }

    pub fn flags_cache_enabled(&self) -> bool {
        self.flags_ttl_seconds > 0
    }

    /// Look a backend up by its location name.
    pub fn by_location(&self, location: &str) -> Option<&CacheBackend> {
        [&self.default, &self.environment_objects, &self.environment_flags]
            .into_iter()
            .find(|backend| backend.location == location)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::new(0)
    }
}
