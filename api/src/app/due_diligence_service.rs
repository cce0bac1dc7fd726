//! Due-diligence service
//!
//! Runs the provider verification pipeline for an accepted quotation: four
//! bureau lookups are folded into a weighted overall score, a risk level,
//! and named flags. When the live bureau is unconfigured or any lookup
//! fails, deterministic simulated scores are used instead and the report is
//! marked as simulated. One report per quotation; reruns return the
//! existing report.

use std::sync::Arc;

use crate::domain::entities::{
    DueDiligenceReport, NewDueDiligenceReport, ProviderProfile, Quotation, QuotationId,
    QuotationStatus, RiskLevel, User, VerificationScores,
};
use crate::domain::ports::{
    DueDiligenceRepository, ProjectRepository, ProviderProfileRepository, QuotationRepository,
    VerificationBureau,
};
use crate::error::{AppError, DomainError, VerifierError};

use crate::adapters::verifier::SimulatedBureau;

/// Service running the verification pipeline
pub struct DueDiligenceService<DR, QR, PR, PPR>
where
    DR: DueDiligenceRepository,
    QR: QuotationRepository,
    PR: ProjectRepository,
    PPR: ProviderProfileRepository,
{
    reports: Arc<DR>,
    quotations: Arc<QR>,
    projects: Arc<PR>,
    provider_profiles: Arc<PPR>,
    /// Live bureau, absent when no API key is configured
    bureau: Option<Arc<dyn VerificationBureau>>,
    fallback: SimulatedBureau,
}

impl<DR, QR, PR, PPR> DueDiligenceService<DR, QR, PR, PPR>
where
    DR: DueDiligenceRepository,
    QR: QuotationRepository,
    PR: ProjectRepository,
    PPR: ProviderProfileRepository,
{
    pub fn new(
        reports: Arc<DR>,
        quotations: Arc<QR>,
        projects: Arc<PR>,
        provider_profiles: Arc<PPR>,
        bureau: Option<Arc<dyn VerificationBureau>>,
    ) -> Self {
        Self {
            reports,
            quotations,
            projects,
            provider_profiles,
            bureau,
            fallback: SimulatedBureau::new(),
        }
    }

    /// Run due diligence for an accepted quotation. Project owner only,
    /// idempotent per quotation.
    pub async fn run(
        &self,
        user: &User,
        quotation_id: &QuotationId,
    ) -> Result<DueDiligenceReport, AppError> {
        let quotation = self.require_accepted_quotation(user, quotation_id).await?;

        if let Some(existing) = self.reports.find_by_quotation(quotation_id).await? {
            return Ok(existing);
        }

        let profile = self
            .provider_profiles
            .find_by_user(&quotation.provider_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Provider profile not found".to_string()))?;

        let (scores, simulated) = self.gather_scores(&profile).await?;
        let overall_score = scores.weighted_overall();
        let risk_level = RiskLevel::assess(&scores);
        let flags = scores.flags();

        let report = self
            .reports
            .create(&NewDueDiligenceReport {
                quotation_id: *quotation_id,
                provider_id: quotation.provider_id,
                scores,
                overall_score,
                risk_level,
                flags,
                simulated,
            })
            .await?;

        tracing::info!(
            quotation_id = %quotation_id,
            overall_score,
            risk_level = %risk_level,
            simulated,
            "Due-diligence report generated"
        );
        Ok(report)
    }

    /// Fetch the report for a quotation. Project owner only.
    pub async fn get(
        &self,
        user: &User,
        quotation_id: &QuotationId,
    ) -> Result<DueDiligenceReport, AppError> {
        self.require_accepted_quotation(user, quotation_id).await?;
        self.reports
            .find_by_quotation(quotation_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No due-diligence report for this quotation".to_string())
            })
    }

    async fn require_accepted_quotation(
        &self,
        user: &User,
        quotation_id: &QuotationId,
    ) -> Result<Quotation, AppError> {
        let quotation = self
            .quotations
            .find_by_id(quotation_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quotation {} not found", quotation_id)))?;
        let project = self
            .projects
            .find_by_id(&quotation.project_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Project {} not found", quotation.project_id))
            })?;
        if project.client_id != user.id {
            return Err(AppError::Forbidden(
                "Only the project owner can run due diligence".to_string(),
            ));
        }
        if quotation.status != QuotationStatus::Accepted {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Due diligence requires an accepted quotation, this one is {}",
                quotation.status
            ))));
        }
        Ok(quotation)
    }

    /// Four bureau lookups; any failure switches the whole report to
    /// simulated scores so the dimensions stay comparable.
    async fn gather_scores(
        &self,
        profile: &ProviderProfile,
    ) -> Result<(VerificationScores, bool), AppError> {
        if let Some(bureau) = &self.bureau {
            match Self::lookup_all(bureau.as_ref(), profile).await {
                Ok(scores) => return Ok((scores, false)),
                Err(err) => {
                    tracing::warn!(
                        provider_id = %profile.user_id,
                        error = %err,
                        "Bureau lookup failed, using simulated scores"
                    );
                }
            }
        }
        let scores = Self::lookup_all(&self.fallback, profile)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok((scores, true))
    }

    async fn lookup_all(
        bureau: &dyn VerificationBureau,
        profile: &ProviderProfile,
    ) -> Result<VerificationScores, VerifierError> {
        Ok(VerificationScores {
            registry: bureau.registry_standing(profile).await?.score,
            financial: bureau.financial_standing(profile).await?.score,
            certifications: bureau.certification_validity(profile).await?.score,
            references: bureau.reference_checks(profile).await?.score,
        })
    }
}
