//! PostgreSQL adapter for QuotationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    NewQuotation, ProjectId, Quotation, QuotationId, QuotationStatus, UserId,
};
use crate::domain::ports::QuotationRepository;
use crate::entity::quotations;
use crate::error::DomainError;

/// PostgreSQL implementation of QuotationRepository
pub struct PostgresQuotationRepository {
    db: DatabaseConnection,
}

impl PostgresQuotationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuotationRepository for PostgresQuotationRepository {
    async fn find_by_id(&self, id: &QuotationId) -> Result<Option<Quotation>, DomainError> {
        let result = quotations::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Quotation>, DomainError> {
        let results = quotations::Entity::find()
            .filter(quotations::Column::ProjectId.eq(project_id.0))
            .order_by_desc(quotations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_pending_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<Quotation>, DomainError> {
        let results = quotations::Entity::find()
            .filter(quotations::Column::ProjectId.eq(project_id.0))
            .filter(quotations::Column::Status.eq(QuotationStatus::Pending.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_provider(
        &self,
        provider_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Quotation>, DomainError> {
        let results = quotations::Entity::find()
            .filter(quotations::Column::ProviderId.eq(provider_id.0))
            .order_by_desc(quotations::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn exists_for_project_and_provider(
        &self,
        project_id: &ProjectId,
        provider_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result = quotations::Entity::find()
            .filter(quotations::Column::ProjectId.eq(project_id.0))
            .filter(quotations::Column::ProviderId.eq(provider_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn create(&self, quotation: &NewQuotation) -> Result<Quotation, DomainError> {
        let model = quotations::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(quotation.project_id.0),
            provider_id: Set(quotation.provider_id.0),
            amount_cents: Set(quotation.amount_cents),
            estimated_days: Set(quotation.estimated_days),
            proposal: Set(quotation.proposal.clone()),
            status: Set(QuotationStatus::Pending.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
            decided_at: Set(None),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_status(
        &self,
        id: &QuotationId,
        status: QuotationStatus,
        decided_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let model = quotations::ActiveModel {
            id: Set(id.0),
            status: Set(status.to_string()),
            decided_at: Set(Some(decided_at.fixed_offset())),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<quotations::Model> for Quotation {
    fn from(model: quotations::Model) -> Self {
        Quotation {
            id: QuotationId(model.id),
            project_id: ProjectId(model.project_id),
            provider_id: UserId(model.provider_id),
            amount_cents: model.amount_cents,
            estimated_days: model.estimated_days,
            proposal: model.proposal,
            status: model.status.parse().unwrap_or(QuotationStatus::Pending),
            created_at: model.created_at.with_timezone(&Utc),
            decided_at: model.decided_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}
