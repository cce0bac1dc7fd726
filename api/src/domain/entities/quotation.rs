//! Quotation domain entity
//!
//! A provider's priced proposal against an open project. One quotation per
//! provider per project; accepting one rejects all other pending ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::ProjectId;
use super::user::UserId;

/// Unique identifier for a quotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotationId(pub Uuid);

impl QuotationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuotationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for QuotationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for QuotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quotation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotationStatus::Pending => write!(f, "pending"),
            QuotationStatus::Accepted => write!(f, "accepted"),
            QuotationStatus::Rejected => write!(f, "rejected"),
            QuotationStatus::Withdrawn => write!(f, "withdrawn"),
        }
    }
}

impl std::str::FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(QuotationStatus::Pending),
            "accepted" => Ok(QuotationStatus::Accepted),
            "rejected" => Ok(QuotationStatus::Rejected),
            "withdrawn" => Ok(QuotationStatus::Withdrawn),
            _ => Err(format!("Unknown quotation status: {}", s)),
        }
    }
}

/// A provider's priced proposal on a project
#[derive(Debug, Clone, Serialize)]
pub struct Quotation {
    pub id: QuotationId,
    pub project_id: ProjectId,
    pub provider_id: UserId,
    pub amount_cents: i64,
    pub estimated_days: i32,
    pub proposal: String,
    pub status: QuotationStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Quotation {
    /// Only pending quotations can be accepted, rejected, or withdrawn
    pub fn is_decidable(&self) -> bool {
        self.status == QuotationStatus::Pending
    }
}

/// Data needed to create a new quotation
#[derive(Debug, Clone)]
pub struct NewQuotation {
    pub project_id: ProjectId,
    pub provider_id: UserId,
    pub amount_cents: i64,
    pub estimated_days: i32,
    pub proposal: String,
}

/// Summary statistics a client sees when comparing quotations on a project
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuotationComparison {
    pub count: usize,
    pub min_amount_cents: i64,
    pub max_amount_cents: i64,
    pub mean_amount_cents: i64,
    pub min_estimated_days: i32,
    pub max_estimated_days: i32,
}

impl QuotationComparison {
    /// Compute comparison stats over a set of quotations. None when empty.
    pub fn from_quotations(quotations: &[Quotation]) -> Option<Self> {
        if quotations.is_empty() {
            return None;
        }
        let amounts: Vec<i64> = quotations.iter().map(|q| q.amount_cents).collect();
        let days: Vec<i32> = quotations.iter().map(|q| q.estimated_days).collect();
        let total: i64 = amounts.iter().sum();
        Some(Self {
            count: quotations.len(),
            min_amount_cents: *amounts.iter().min().unwrap(),
            max_amount_cents: *amounts.iter().max().unwrap(),
            mean_amount_cents: total / quotations.len() as i64,
            min_estimated_days: *days.iter().min().unwrap(),
            max_estimated_days: *days.iter().max().unwrap(),
        })
    }
}
