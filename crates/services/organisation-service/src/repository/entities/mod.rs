//! SeaORM entities.

pub mod organisation;
