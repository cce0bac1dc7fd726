//! Due-diligence domain entities
//!
//! The verification pipeline scores a provider across four dimensions
//! (0-100 each), folds them into a weighted overall score, and derives a
//! risk level plus named flags. Reports are persisted per quotation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::quotation::QuotationId;
use super::user::UserId;
use crate::app::policy::{
    DIMENSION_FLAG_THRESHOLD, RISK_LOW_THRESHOLD, RISK_MEDIUM_THRESHOLD, WEIGHT_CERTIFICATIONS,
    WEIGHT_FINANCIAL, WEIGHT_REFERENCES, WEIGHT_REGISTRY,
};

/// Unique identifier for a due-diligence report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-dimension verification scores, 0-100 each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationScores {
    pub registry: i32,
    pub financial: i32,
    pub certifications: i32,
    pub references: i32,
}

impl VerificationScores {
    /// Weighted overall score, 0-100. Weights are percentages summing to 100.
    pub fn weighted_overall(&self) -> i32 {
        (self.registry * WEIGHT_REGISTRY
            + self.financial * WEIGHT_FINANCIAL
            + self.certifications * WEIGHT_CERTIFICATIONS
            + self.references * WEIGHT_REFERENCES)
            / 100
    }

    /// Named flags for dimensions scoring below the flag threshold
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if self.registry < DIMENSION_FLAG_THRESHOLD {
            flags.push("registry_standing_low".to_string());
        }
        if self.financial < DIMENSION_FLAG_THRESHOLD {
            flags.push("financial_standing_low".to_string());
        }
        if self.certifications < DIMENSION_FLAG_THRESHOLD {
            flags.push("certifications_unverified".to_string());
        }
        if self.references < DIMENSION_FLAG_THRESHOLD {
            flags.push("references_weak".to_string());
        }
        flags
    }
}

/// Risk classification derived from the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Classify from scores: overall score bands, with weak financials
    /// forcing at least medium risk regardless of the overall score.
    pub fn assess(scores: &VerificationScores) -> Self {
        let overall = scores.weighted_overall();
        let banded = if overall >= RISK_LOW_THRESHOLD {
            RiskLevel::Low
        } else if overall >= RISK_MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };
        if scores.financial < DIMENSION_FLAG_THRESHOLD {
            banded.max(RiskLevel::Medium)
        } else {
            banded
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

/// A persisted due-diligence report for an accepted quotation
#[derive(Debug, Clone, Serialize)]
pub struct DueDiligenceReport {
    pub id: ReportId,
    pub quotation_id: QuotationId,
    pub provider_id: UserId,
    pub scores: VerificationScores,
    pub overall_score: i32,
    pub risk_level: RiskLevel,
    pub flags: Vec<String>,
    /// True when bureau lookups failed and simulated scores were used
    pub simulated: bool,
    pub created_at: DateTime<Utc>,
}

/// Data needed to persist a new report
#[derive(Debug, Clone)]
pub struct NewDueDiligenceReport {
    pub quotation_id: QuotationId,
    pub provider_id: UserId,
    pub scores: VerificationScores,
    pub overall_score: i32,
    pub risk_level: RiskLevel,
    pub flags: Vec<String>,
    pub simulated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(registry: i32, financial: i32, certifications: i32, references: i32) -> VerificationScores {
        VerificationScores {
            registry,
            financial,
            certifications,
            references,
        }
    }

    #[test]
    fn weighted_overall_uniform_scores() {
        // All dimensions equal -> overall equals that value
        assert_eq!(scores(80, 80, 80, 80).weighted_overall(), 80);
        assert_eq!(scores(0, 0, 0, 0).weighted_overall(), 0);
        assert_eq!(scores(100, 100, 100, 100).weighted_overall(), 100);
    }

    #[test]
    fn weighted_overall_respects_weights() {
        // Financial carries the largest weight (30%)
        let financial_heavy = scores(50, 100, 50, 50);
        let registry_heavy = scores(100, 50, 50, 50);
        assert!(financial_heavy.weighted_overall() > registry_heavy.weighted_overall());
    }

    #[test]
    fn risk_bands() {
        assert_eq!(RiskLevel::assess(&scores(90, 90, 90, 90)), RiskLevel::Low);
        assert_eq!(RiskLevel::assess(&scores(60, 60, 60, 60)), RiskLevel::Medium);
        assert_eq!(RiskLevel::assess(&scores(30, 45, 30, 30)), RiskLevel::High);
    }

    #[test]
    fn weak_financials_force_medium() {
        // Overall would band as low, but financial < threshold caps at medium
        let s = scores(100, 35, 100, 100);
        assert!(s.weighted_overall() >= RISK_LOW_THRESHOLD);
        assert_eq!(RiskLevel::assess(&s), RiskLevel::Medium);
    }

    #[test]
    fn weak_financials_do_not_soften_high() {
        let s = scores(10, 35, 10, 10);
        assert_eq!(RiskLevel::assess(&s), RiskLevel::High);
    }

    #[test]
    fn flags_name_low_dimensions() {
        let s = scores(30, 90, 90, 35);
        let flags = s.flags();
        assert!(flags.contains(&"registry_standing_low".to_string()));
        assert!(flags.contains(&"references_weak".to_string()));
        assert_eq!(flags.len(), 2);
    }

    #[test]
    fn risk_level_round_trip() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(level.to_string().parse::<RiskLevel>().unwrap(), level);
        }
    }
}
