//! Quotation service
//!
//! Providers quote against open projects; the owning client compares and
//! decides. Accepting one quotation rejects every other pending quotation on
//! the project and moves the project out of the open pool.

use std::sync::Arc;

use chrono::Utc;

use crate::app::PageParams;
use crate::domain::entities::{
    NewQuotation, Project, ProjectId, ProjectStatus, Quotation, QuotationComparison, QuotationId,
    QuotationStatus, User,
};
use crate::domain::ports::{ProjectRepository, ProviderProfileRepository, QuotationRepository};
use crate::error::{AppError, DomainError, FieldError};

/// Input for submitting a quotation
#[derive(Debug, Clone)]
pub struct SubmitQuotation {
    pub project_id: ProjectId,
    pub amount_cents: i64,
    pub estimated_days: i32,
    pub proposal: String,
}

/// A project's quotations together with comparison statistics
#[derive(Debug, serde::Serialize)]
pub struct QuotationListing {
    pub quotations: Vec<Quotation>,
    pub comparison: Option<QuotationComparison>,
}

/// Service for the quotation lifecycle
pub struct QuotationService<QR, PR, PPR>
where
    QR: QuotationRepository,
    PR: ProjectRepository,
    PPR: ProviderProfileRepository,
{
    quotations: Arc<QR>,
    projects: Arc<PR>,
    provider_profiles: Arc<PPR>,
}

impl<QR, PR, PPR> QuotationService<QR, PR, PPR>
where
    QR: QuotationRepository,
    PR: ProjectRepository,
    PPR: ProviderProfileRepository,
{
    pub fn new(quotations: Arc<QR>, projects: Arc<PR>, provider_profiles: Arc<PPR>) -> Self {
        Self {
            quotations,
            projects,
            provider_profiles,
        }
    }

    /// Submit a quotation on an open project.
    ///
    /// Requires a completed provider profile, rejects quoting your own
    /// project, and allows at most one quotation per provider per project.
    pub async fn submit(&self, user: &User, input: SubmitQuotation) -> Result<Quotation, AppError> {
        if !user.is_provider() {
            return Err(AppError::Forbidden(
                "Only provider accounts can submit quotations".to_string(),
            ));
        }
        let profile = self.provider_profiles.find_by_user(&user.id).await?;
        if !profile.map(|p| p.completed).unwrap_or(false) {
            return Err(AppError::Forbidden(
                "Complete onboarding before submitting quotations".to_string(),
            ));
        }

        let project = self.require_project(&input.project_id).await?;
        if project.status != ProjectStatus::Open {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Project is {}, not accepting quotations",
                project.status
            ))));
        }
        if project.client_id == user.id {
            return Err(AppError::Forbidden(
                "Cannot quote your own project".to_string(),
            ));
        }
        if self
            .quotations
            .exists_for_project_and_provider(&project.id, &user.id)
            .await?
        {
            return Err(AppError::Domain(DomainError::Conflict(
                "You have already quoted this project".to_string(),
            )));
        }

        let mut fields = Vec::new();
        if input.amount_cents <= 0 {
            fields.push(FieldError::new("amount_cents", "must be positive"));
        }
        if input.estimated_days < 1 {
            fields.push(FieldError::new("estimated_days", "must be at least 1"));
        }
        if input.proposal.trim().is_empty() {
            fields.push(FieldError::new("proposal", "must not be empty"));
        }
        if !fields.is_empty() {
            return Err(AppError::Fields(fields));
        }

        let quotation = self
            .quotations
            .create(&NewQuotation {
                project_id: project.id,
                provider_id: user.id,
                amount_cents: input.amount_cents,
                estimated_days: input.estimated_days,
                proposal: input.proposal.trim().to_string(),
            })
            .await?;

        tracing::info!(
            quotation_id = %quotation.id,
            project_id = %project.id,
            provider_id = %user.id,
            "Quotation submitted"
        );
        Ok(quotation)
    }

    /// All quotations on a project with comparison stats. Owner only.
    pub async fn list_for_project(
        &self,
        user: &User,
        project_id: &ProjectId,
    ) -> Result<QuotationListing, AppError> {
        let project = self.require_project(project_id).await?;
        if project.client_id != user.id {
            return Err(AppError::Forbidden(
                "Only the project owner can view its quotations".to_string(),
            ));
        }
        let quotations = self.quotations.find_by_project(project_id).await?;
        let comparison = QuotationComparison::from_quotations(&quotations);
        Ok(QuotationListing {
            quotations,
            comparison,
        })
    }

    /// A provider's own quotations, paginated
    pub async fn list_mine(
        &self,
        user: &User,
        page: PageParams,
    ) -> Result<Vec<Quotation>, AppError> {
        Ok(self
            .quotations
            .find_by_provider(&user.id, page.limit(), page.offset())
            .await?)
    }

    /// Accept a quotation: rejects all other pending quotations on the
    /// project and moves the project to quotation_accepted.
    pub async fn accept(&self, user: &User, id: &QuotationId) -> Result<Quotation, AppError> {
        let quotation = self.require_quotation(id).await?;
        let project = self.require_project(&quotation.project_id).await?;
        if project.client_id != user.id {
            return Err(AppError::Forbidden(
                "Only the project owner can accept a quotation".to_string(),
            ));
        }
        if !quotation.is_decidable() {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Quotation is already {}",
                quotation.status
            ))));
        }
        if !project.status.can_transition_to(ProjectStatus::QuotationAccepted) {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Project is {}, cannot accept a quotation",
                project.status
            ))));
        }

        let now = Utc::now();
        self.quotations
            .update_status(id, QuotationStatus::Accepted, now)
            .await?;

        // Cascade: every other pending quotation on the project is rejected.
        for other in self
            .quotations
            .find_pending_by_project(&project.id)
            .await?
        {
            if other.id != *id {
                self.quotations
                    .update_status(&other.id, QuotationStatus::Rejected, now)
                    .await?;
            }
        }

        self.projects
            .update_status(&project.id, ProjectStatus::QuotationAccepted)
            .await?;

        tracing::info!(
            quotation_id = %id,
            project_id = %project.id,
            "Quotation accepted"
        );
        self.require_quotation(id).await
    }

    /// Reject a pending quotation. Owner only.
    pub async fn reject(&self, user: &User, id: &QuotationId) -> Result<Quotation, AppError> {
        let quotation = self.require_quotation(id).await?;
        let project = self.require_project(&quotation.project_id).await?;
        if project.client_id != user.id {
            return Err(AppError::Forbidden(
                "Only the project owner can reject a quotation".to_string(),
            ));
        }
        if !quotation.is_decidable() {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Quotation is already {}",
                quotation.status
            ))));
        }
        self.quotations
            .update_status(id, QuotationStatus::Rejected, Utc::now())
            .await?;
        self.require_quotation(id).await
    }

    /// Withdraw a pending quotation. Submitting provider only.
    pub async fn withdraw(&self, user: &User, id: &QuotationId) -> Result<Quotation, AppError> {
        let quotation = self.require_quotation(id).await?;
        if quotation.provider_id != user.id {
            return Err(AppError::Forbidden(
                "Only the submitting provider can withdraw a quotation".to_string(),
            ));
        }
        if !quotation.is_decidable() {
            return Err(AppError::Domain(DomainError::Conflict(format!(
                "Quotation is already {}",
                quotation.status
            ))));
        }
        self.quotations
            .update_status(id, QuotationStatus::Withdrawn, Utc::now())
            .await?;
        self.require_quotation(id).await
    }

    async fn require_project(&self, id: &ProjectId) -> Result<Project, AppError> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    async fn require_quotation(&self, id: &QuotationId) -> Result<Quotation, AppError> {
        self.quotations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quotation {} not found", id)))
    }
}
