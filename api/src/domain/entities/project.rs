//! Project domain entity
//!
//! A client's posted engagement that providers quote against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Unique identifier for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProjectId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Accepting quotations
    Open,
    /// A quotation has been accepted, contract pending
    QuotationAccepted,
    /// Contract active, work underway
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Open => write!(f, "open"),
            ProjectStatus::QuotationAccepted => write!(f, "quotation_accepted"),
            ProjectStatus::InProgress => write!(f, "in_progress"),
            ProjectStatus::Completed => write!(f, "completed"),
            ProjectStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(ProjectStatus::Open),
            "quotation_accepted" => Ok(ProjectStatus::QuotationAccepted),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "cancelled" => Ok(ProjectStatus::Cancelled),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

impl ProjectStatus {
    /// Valid forward transitions for the project lifecycle
    pub fn can_transition_to(&self, next: ProjectStatus) -> bool {
        matches!(
            (self, next),
            (ProjectStatus::Open, ProjectStatus::QuotationAccepted)
                | (ProjectStatus::Open, ProjectStatus::Cancelled)
                | (ProjectStatus::QuotationAccepted, ProjectStatus::InProgress)
                | (ProjectStatus::InProgress, ProjectStatus::Completed)
        )
    }
}

/// A client's posted project
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub client_id: UserId,
    pub title: String,
    pub description: String,
    /// SAP module code the engagement centers on (e.g. "FI", "MM")
    pub sap_module: String,
    pub budget_min_cents: i64,
    pub budget_max_cents: i64,
    pub expected_duration_days: i32,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a new project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub client_id: UserId,
    pub title: String,
    pub description: String,
    pub sap_module: String,
    pub budget_min_cents: i64,
    pub budget_max_cents: i64,
    pub expected_duration_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [
            ProjectStatus::Open,
            ProjectStatus::QuotationAccepted,
            ProjectStatus::InProgress,
            ProjectStatus::Completed,
            ProjectStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<ProjectStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn open_can_accept_or_cancel() {
        assert!(ProjectStatus::Open.can_transition_to(ProjectStatus::QuotationAccepted));
        assert!(ProjectStatus::Open.can_transition_to(ProjectStatus::Cancelled));
        assert!(!ProjectStatus::Open.can_transition_to(ProjectStatus::Completed));
    }

    #[test]
    fn completed_is_terminal() {
        for next in [
            ProjectStatus::Open,
            ProjectStatus::QuotationAccepted,
            ProjectStatus::InProgress,
            ProjectStatus::Cancelled,
        ] {
            assert!(!ProjectStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn cancelled_only_from_open() {
        assert!(!ProjectStatus::InProgress.can_transition_to(ProjectStatus::Cancelled));
        assert!(!ProjectStatus::QuotationAccepted.can_transition_to(ProjectStatus::Cancelled));
    }
}
