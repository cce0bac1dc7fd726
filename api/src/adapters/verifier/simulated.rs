//! Simulated verification bureau
//!
//! Stand-in scoring used when the live bureau is unavailable or not
//! configured. Scores are deterministic per provider (hash-seeded from the
//! user id and dimension name) so repeated runs agree, nudged by profile
//! completeness so richer profiles score a little better.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::entities::ProviderProfile;
use crate::domain::ports::{BureauScore, VerificationBureau};
use crate::error::VerifierError;

/// Deterministic in-process bureau
#[derive(Default)]
pub struct SimulatedBureau;

impl SimulatedBureau {
    pub fn new() -> Self {
        Self
    }

    /// Base score in 50..=90, stable per (provider, dimension)
    fn base_score(profile: &ProviderProfile, dimension: &str) -> i32 {
        let mut hasher = Sha256::new();
        hasher.update(profile.user_id.0.as_bytes());
        hasher.update(dimension.as_bytes());
        let digest = hasher.finalize();
        50 + (digest[0] as i32) % 41
    }

    fn score(profile: &ProviderProfile, dimension: &str, bonus: i32) -> BureauScore {
        BureauScore {
            score: (Self::base_score(profile, dimension) + bonus).clamp(0, 100),
            note: Some("simulated".to_string()),
        }
    }
}

#[async_trait]
impl VerificationBureau for SimulatedBureau {
    async fn registry_standing(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        let bonus = if profile.registration_number.is_some() {
            10
        } else {
            -20
        };
        Ok(Self::score(profile, "registry", bonus))
    }

    async fn financial_standing(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        let bonus = profile.years_experience.unwrap_or(0).min(10);
        Ok(Self::score(profile, "financial", bonus))
    }

    async fn certification_validity(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        let bonus = (profile.certifications.len() as i32 * 5).min(15);
        Ok(Self::score(profile, "certifications", bonus))
    }

    async fn reference_checks(
        &self,
        profile: &ProviderProfile,
    ) -> Result<BureauScore, VerifierError> {
        Ok(Self::score(profile, "references", 0))
    }
}
