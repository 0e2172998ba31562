//! Environment variable access.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Source of environment variables.
///
/// Settings never read `std::env` directly so they can be assembled from a
/// fixed map in tests.
pub trait EnvSource {
    /// Raw value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key`, treating an empty string as unset.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }

    /// Parse `key`, using `default` when unset or empty.
    fn parse_or<T>(&self, key: &'static str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.non_empty(key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| AppError::invalid_setting(key, raw.clone(), e.to_string())),
        }
    }

    /// Boolean switch; unset or empty is `false`.
    fn flag(&self, key: &'static str) -> AppResult<bool> {
        let Some(raw) = self.non_empty(key) else {
            return Ok(false);
        };
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(AppError::invalid_setting(
                key,
                raw,
                "expected one of true/false, yes/no, on/off, 1/0",
            )),
        }
    }

    /// Comma-separated list; segments are trimmed and empty ones dropped.
    fn list(&self, key: &str) -> Vec<String> {
        self.var(key)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Load `.env` (if present) and return the process environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self
    }
}

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_parse_or_default_when_unset() {
        let env = env(&[]);
        assert_eq!(env.parse_or::<u32>("HOSTED_SEATS_LIMIT", 0).unwrap(), 0);
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        let env = env(&[("HOSTED_SEATS_LIMIT", "many")]);
        let err = env.parse_or::<u32>("HOSTED_SEATS_LIMIT", 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidSetting { name: "HOSTED_SEATS_LIMIT", .. }));
    }

    #[test]
    fn test_flag_values() {
        assert!(env(&[("X", "True")]).flag("X").unwrap());
        assert!(env(&[("X", "1")]).flag("X").unwrap());
        assert!(!env(&[("X", "off")]).flag("X").unwrap());
        assert!(!env(&[("X", "")]).flag("X").unwrap());
        assert!(!env(&[]).flag("X").unwrap());
        assert!(env(&[("X", "maybe")]).flag("X").is_err());
    }

    #[test]
    fn test_list_trims_and_drops_empty() {
        let env = env(&[("HOSTS", " a.example.com,,b.example.com ,")]);
        assert_eq!(env.list("HOSTS"), vec!["a.example.com", "b.example.com"]);
        assert!(env.list("MISSING").is_empty());
    }
}
