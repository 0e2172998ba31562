//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling
//! - Database connection configuration
//! - Runtime settings assembled from the environment

pub mod config;
pub mod error;
pub mod settings;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use settings::{ConfigWarning, EnvSource, ProcessEnv, Settings};
