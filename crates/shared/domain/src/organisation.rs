//! Organisation domain entity and related types.
//!
//! An organisation is the tenant of the product: the unit of billing and
//! membership. Projects, environments and users all hang off it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MIN_ORGANISATION_NAME_LENGTH, ORGANISATION_NAME_MAX_LENGTH, ORGANISATION_PLAN_MAX_LENGTH,
};
use crate::error::{DomainError, DomainResult};

/// Organisation domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    pub id: i32,
    pub name: String,
    pub created_date: DateTime<Utc>,
    /// Labelled "SubscriptionDate"; `None` until the organisation subscribes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_date: Option<DateTime<Utc>>,
    /// Billing plan identifier (`None` = no plan recorded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

impl Organisation {
    /// Create a new organisation without subscription or plan
    pub fn new(id: i32, name: String) -> Self {
        Self {
            id,
            name,
            created_date: Utc::now(),
            subscription_date: None,
            plan: None,
        }
    }

    /// Check if the organisation has ever subscribed
    pub fn is_subscribed(&self) -> bool {
        self.subscription_date.is_some()
    }

    /// Record a subscription on the given plan
    pub fn subscribe(&mut self, plan: String, at: DateTime<Utc>) -> DomainResult<()> {
        self.set_plan(Some(plan))?;
        self.subscription_date = Some(at);
        Ok(())
    }

    /// Replace the billing plan.
    ///
    /// An empty plan is stored as `None`.
    pub fn set_plan(&mut self, plan: Option<String>) -> DomainResult<()> {
        self.plan = validate_plan(plan)?;
        Ok(())
    }
}

/// Normalise and validate a plan identifier.
pub fn validate_plan(plan: Option<String>) -> DomainResult<Option<String>> {
    match plan {
        None => Ok(None),
        Some(plan) if plan.is_empty() => Ok(None),
        Some(plan) if plan.chars().count() > ORGANISATION_PLAN_MAX_LENGTH => {
            Err(DomainError::validation(format!(
                "plan must be at most {} characters",
                ORGANISATION_PLAN_MAX_LENGTH
            )))
        }
        Some(plan) => Ok(Some(plan)),
    }
}

/// Organisation creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganisation {
    /// Organisation display name
    pub name: String,
    /// Optional initial plan
    #[serde(default)]
    pub plan: Option<String>,
}

impl CreateOrganisation {
    /// Validate the creation request
    pub fn validate(&self) -> DomainResult<()> {
        let len = self.name.trim().chars().count();
        if len < MIN_ORGANISATION_NAME_LENGTH {
            return Err(DomainError::validation("name must not be empty"));
        }
        if len > ORGANISATION_NAME_MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "name must be at most {} characters",
                ORGANISATION_NAME_MAX_LENGTH
            )));
        }
        validate_plan(self.plan.clone()).map(|_| ())
    }
}
