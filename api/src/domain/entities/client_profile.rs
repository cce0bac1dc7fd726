//! Client profile domain entity
//!
//! Built up by the client onboarding wizard: company info, SAP modules
//! needed, budget and timeline preferences. Step progression is strictly
//! linear and persisted server-side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;
use crate::app::policy::CLIENT_WIZARD_STEPS;

/// Unique identifier for a client profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientProfileId(pub Uuid);

impl ClientProfileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Company headcount bracket collected in step 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanySize::Small => write!(f, "small"),
            CompanySize::Medium => write!(f, "medium"),
            CompanySize::Large => write!(f, "large"),
            CompanySize::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl std::str::FromStr for CompanySize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(CompanySize::Small),
            "medium" => Ok(CompanySize::Medium),
            "large" => Ok(CompanySize::Large),
            "enterprise" => Ok(CompanySize::Enterprise),
            _ => Err(format!("Unknown company size: {}", s)),
        }
    }
}

/// An enterprise client's marketplace profile
#[derive(Debug, Clone, Serialize)]
pub struct ClientProfile {
    pub id: ClientProfileId,
    pub user_id: UserId,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<CompanySize>,
    /// SAP module codes the client needs help with (e.g. "FI", "MM", "SD")
    pub sap_modules_needed: Vec<String>,
    pub budget_min_cents: Option<i64>,
    pub budget_max_cents: Option<i64>,
    pub preferred_start: Option<DateTime<Utc>>,
    /// Current wizard step, 1-based
    pub onboarding_step: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientProfile {
    pub fn is_final_step(&self) -> bool {
        self.onboarding_step >= CLIENT_WIZARD_STEPS
    }
}

/// Data needed to create a fresh client profile at step 1
#[derive(Debug, Clone)]
pub struct NewClientProfile {
    pub user_id: UserId,
}
