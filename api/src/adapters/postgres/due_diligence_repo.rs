//! PostgreSQL adapter for DueDiligenceRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    DueDiligenceReport, NewDueDiligenceReport, QuotationId, ReportId, RiskLevel, UserId,
    VerificationScores,
};
use crate::domain::ports::DueDiligenceRepository;
use crate::entity::due_diligence_reports;
use crate::error::DomainError;

/// PostgreSQL implementation of DueDiligenceRepository
pub struct PostgresDueDiligenceRepository {
    db: DatabaseConnection,
}

impl PostgresDueDiligenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DueDiligenceRepository for PostgresDueDiligenceRepository {
    async fn find_by_quotation(
        &self,
        quotation_id: &QuotationId,
    ) -> Result<Option<DueDiligenceReport>, DomainError> {
        let result = due_diligence_reports::Entity::find()
            .filter(due_diligence_reports::Column::QuotationId.eq(quotation_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(
        &self,
        report: &NewDueDiligenceReport,
    ) -> Result<DueDiligenceReport, DomainError> {
        let model = due_diligence_reports::ActiveModel {
            id: Set(Uuid::new_v4()),
            quotation_id: Set(report.quotation_id.0),
            provider_id: Set(report.provider_id.0),
            registry_score: Set(report.scores.registry),
            financial_score: Set(report.scores.financial),
            certifications_score: Set(report.scores.certifications),
            references_score: Set(report.scores.references),
            overall_score: Set(report.overall_score),
            risk_level: Set(report.risk_level.to_string()),
            flags: Set(serde_json::json!(report.flags)),
            simulated: Set(report.simulated),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<due_diligence_reports::Model> for DueDiligenceReport {
    fn from(model: due_diligence_reports::Model) -> Self {
        DueDiligenceReport {
            id: ReportId(model.id),
            quotation_id: QuotationId(model.quotation_id),
            provider_id: UserId(model.provider_id),
            scores: VerificationScores {
                registry: model.registry_score,
                financial: model.financial_score,
                certifications: model.certifications_score,
                references: model.references_score,
            },
            overall_score: model.overall_score,
            risk_level: model.risk_level.parse().unwrap_or(RiskLevel::High),
            flags: serde_json::from_value(model.flags).unwrap_or_default(),
            simulated: model.simulated,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
