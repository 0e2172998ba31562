//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Organisations
// =============================================================================

/// Maximum length of an organisation's subscription plan identifier
pub const ORGANISATION_PLAN_MAX_LENGTH: usize = 20;

/// Maximum length of an organisation name
pub const ORGANISATION_NAME_MAX_LENGTH: usize = 2000;

/// Minimum organisation name length
pub const MIN_ORGANISATION_NAME_LENGTH: usize = 1;

/// Display label of the subscription date attribute
pub const SUBSCRIPTION_DATE_LABEL: &str = "SubscriptionDate";
