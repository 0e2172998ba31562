//! Repository layer for data access.

pub mod entities;
mod organisation_repository;

pub use organisation_repository::{OrganisationRepository, OrganisationStore};
