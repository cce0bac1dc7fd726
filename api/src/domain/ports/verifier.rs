//! Verification bureau port
//!
//! Abstracts the external API that scores provider firms during due
//! diligence. The due-diligence service falls back to simulated scores
//! when a lookup fails.

use async_trait::async_trait;

use crate::domain::entities::ProviderProfile;
use crate::error::VerifierError;

/// A single bureau lookup result: score 0-100 plus the bureau's note
#[derive(Debug, Clone)]
pub struct BureauScore {
    pub score: i32,
    pub note: Option<String>,
}

/// Client for the external verification bureau
#[async_trait]
pub trait VerificationBureau: Send + Sync {
    /// Company registry standing for the firm's registration number
    async fn registry_standing(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError>;

    /// Financial standing (credit/solvency signal)
    async fn financial_standing(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError>;

    /// Validity of the certifications the firm claims
    async fn certification_validity(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError>;

    /// Aggregated client reference checks
    async fn reference_checks(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError>;
}
