//! Contract domain entities
//!
//! The binding agreement generated from an accepted quotation and its
//! due-diligence report. Both parties must sign before the contract goes
//! active; payment milestones are settled in sequence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::due_diligence::RiskLevel;
use super::project::ProjectId;
use super::quotation::QuotationId;
use super::user::UserId;

/// Unique identifier for a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub Uuid);

impl ContractId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContractId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ContractId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contract lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    PendingSignatures,
    Active,
    Completed,
    Terminated,
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractStatus::PendingSignatures => write!(f, "pending_signatures"),
            ContractStatus::Active => write!(f, "active"),
            ContractStatus::Completed => write!(f, "completed"),
            ContractStatus::Terminated => write!(f, "terminated"),
        }
    }
}

impl std::str::FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_signatures" => Ok(ContractStatus::PendingSignatures),
            "active" => Ok(ContractStatus::Active),
            "completed" => Ok(ContractStatus::Completed),
            "terminated" => Ok(ContractStatus::Terminated),
            _ => Err(format!("Unknown contract status: {}", s)),
        }
    }
}

impl ContractStatus {
    pub fn can_transition_to(&self, next: ContractStatus) -> bool {
        matches!(
            (self, next),
            (ContractStatus::PendingSignatures, ContractStatus::Active)
                | (ContractStatus::PendingSignatures, ContractStatus::Terminated)
                | (ContractStatus::Active, ContractStatus::Completed)
                | (ContractStatus::Active, ContractStatus::Terminated)
        )
    }
}

/// Generated contract terms, stored as structured JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub scope: String,
    pub total_amount_cents: i64,
    pub estimated_days: i32,
    pub risk_level: RiskLevel,
    pub termination_notice_days: i32,
    pub payment_schedule_percents: Vec<i32>,
}

/// The binding agreement between client and provider
#[derive(Debug, Clone, Serialize)]
pub struct Contract {
    pub id: ContractId,
    pub quotation_id: QuotationId,
    pub project_id: ProjectId,
    pub client_id: UserId,
    pub provider_id: UserId,
    pub terms: ContractTerms,
    pub total_amount_cents: i64,
    pub status: ContractStatus,
    pub client_signed_at: Option<DateTime<Utc>>,
    pub provider_signed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Contract {
    pub fn client_signed(&self) -> bool {
        self.client_signed_at.is_some()
    }

    pub fn provider_signed(&self) -> bool {
        self.provider_signed_at.is_some()
    }

    /// Both signatures gate the transition to `Active`
    pub fn all_signed(&self) -> bool {
        self.client_signed() && self.provider_signed()
    }

    pub fn is_party(&self, user_id: &UserId) -> bool {
        self.client_id == *user_id || self.provider_id == *user_id
    }
}

/// Data needed to persist a new contract
#[derive(Debug, Clone)]
pub struct NewContract {
    pub quotation_id: QuotationId,
    pub project_id: ProjectId,
    pub client_id: UserId,
    pub provider_id: UserId,
    pub terms: ContractTerms,
    pub total_amount_cents: i64,
}

/// Unique identifier for a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MilestoneId(pub Uuid);

impl MilestoneId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MilestoneId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milestone settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneStatus {
    Pending,
    Paid,
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilestoneStatus::Pending => write!(f, "pending"),
            MilestoneStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for MilestoneStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(MilestoneStatus::Pending),
            "paid" => Ok(MilestoneStatus::Paid),
            _ => Err(format!("Unknown milestone status: {}", s)),
        }
    }
}

/// A scheduled payment milestone on a contract
#[derive(Debug, Clone, Serialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub contract_id: ContractId,
    /// 1-based position in the schedule; payments settle in sequence
    pub sequence: i32,
    pub description: String,
    pub amount_cents: i64,
    pub due_date: DateTime<Utc>,
    pub status: MilestoneStatus,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Data needed to persist a new milestone
#[derive(Debug, Clone)]
pub struct NewMilestone {
    pub contract_id: ContractId,
    pub sequence: i32,
    pub description: String,
    pub amount_cents: i64,
    pub due_date: DateTime<Utc>,
}
