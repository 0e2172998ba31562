//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod organisation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use organisation::{CreateOrganisation, Organisation};
