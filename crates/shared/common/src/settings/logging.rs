//! Console logging levels.

use serde::Serialize;

use super::constants::{LOG_FRAMEWORK_LEVEL, LOG_FRAMEWORK_TARGETS, LOG_ROOT_LEVEL};

/// Log levels: everything at the root level, framework crates quieter.
#[derive(Debug, Clone, Serialize)]
pub struct LoggingSettings {
    pub root_level: String,
    pub framework_level: String,
    pub framework_targets: Vec<String>,
    /// Include the target (logger name) in each console line
    pub show_target: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            root_level: LOG_ROOT_LEVEL.to_string(),
            framework_level: LOG_FRAMEWORK_LEVEL.to_string(),
            framework_targets: LOG_FRAMEWORK_TARGETS.iter().map(|t| t.to_string()).collect(),
            show_target: true,
        }
    }
}

impl LoggingSettings {
    /// Render as a `tracing_subscriber::EnvFilter` directive.
    pub fn env_filter_directive(&self) -> String {
        std::iter::once(self.root_level.clone())
            .chain(
                self.framework_targets
                    .iter()
                    .map(|target| format!("{}={}", target, self.framework_level)),
            )
            .collect::<Vec<_>>()
            .join(",")
    }
}
