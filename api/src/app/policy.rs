//! Marketplace policy constants
//!
//! Verification weights, risk thresholds, milestone payment plans, and the
//! operational knobs shared across services.

use crate::domain::entities::RiskLevel;

/// Weight (percent) of the company registry score in the overall score
pub const WEIGHT_REGISTRY: i32 = 20;

/// Weight (percent) of the financial standing score
pub const WEIGHT_FINANCIAL: i32 = 30;

/// Weight (percent) of the certification validity score
pub const WEIGHT_CERTIFICATIONS: i32 = 25;

/// Weight (percent) of the client references score
pub const WEIGHT_REFERENCES: i32 = 25;

/// Overall score at or above which risk is low
pub const RISK_LOW_THRESHOLD: i32 = 75;

/// Overall score at or above which risk is medium (below: high)
pub const RISK_MEDIUM_THRESHOLD: i32 = 50;

/// Any dimension below this score gets a named risk flag
pub const DIMENSION_FLAG_THRESHOLD: i32 = 40;

/// Number of client wizard steps
pub const CLIENT_WIZARD_STEPS: i32 = 4;

/// Number of provider wizard steps
pub const PROVIDER_WIZARD_STEPS: i32 = 4;

/// Default session lifetime
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 72;

/// Default page size for paginated listings
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Hard cap on page size
pub const MAX_PAGE_SIZE: u64 = 100;

/// Months of history included in the review analytics trend
pub const ANALYTICS_TREND_MONTHS: u32 = 6;

/// Milestone payment plan (percent of total per milestone) by risk level.
/// Riskier engagements get smaller upfront payments spread across more
/// milestones.
pub fn milestone_plan(risk: RiskLevel) -> &'static [i32] {
    match risk {
        RiskLevel::Low => &[30, 40, 30],
        RiskLevel::Medium => &[20, 30, 30, 20],
        RiskLevel::High => &[10, 25, 25, 25, 15],
    }
}

/// Termination notice period (days) by risk level
pub fn termination_notice_days(risk: RiskLevel) -> i32 {
    match risk {
        RiskLevel::Low => 30,
        RiskLevel::Medium => 21,
        RiskLevel::High => 14,
    }
}
