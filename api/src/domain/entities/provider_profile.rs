//! Provider profile domain entity
//!
//! Built up by the provider onboarding wizard: firm info, SAP module
//! specializations and certifications, rates and capacity. Also carries
//! the registry identifiers the due-diligence bureau lookups key on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;
use crate::app::policy::PROVIDER_WIZARD_STEPS;

/// Unique identifier for a provider profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderProfileId(pub Uuid);

impl ProviderProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProviderProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProviderProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A certification held by the provider firm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issued_by: String,
    pub year: i32,
}

/// An SAP provider firm's marketplace profile
#[derive(Debug, Clone, Serialize)]
pub struct ProviderProfile {
    pub id: ProviderProfileId,
    pub user_id: UserId,
    pub firm_name: Option<String>,
    /// Company registration number used for bureau lookups
    pub registration_number: Option<String>,
    pub country: Option<String>,
    pub years_experience: Option<i32>,
    pub consultant_count: Option<i32>,
    /// SAP module codes the firm specializes in
    pub sap_modules: Vec<String>,
    pub certifications: Vec<Certification>,
    pub hourly_rate_min_cents: Option<i64>,
    pub hourly_rate_max_cents: Option<i64>,
    /// Current wizard step, 1-based
    pub onboarding_step: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProviderProfile {
    pub fn is_final_step(&self) -> bool {
        self.onboarding_step >= PROVIDER_WIZARD_STEPS
    }
}

/// Data needed to create a fresh provider profile at step 1
#[derive(Debug, Clone)]
pub struct NewProviderProfile {
    pub user_id: UserId,
}
