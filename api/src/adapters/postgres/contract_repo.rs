//! PostgreSQL adapter for ContractRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    Contract, ContractId, ContractStatus, ContractTerms, Milestone, MilestoneId, MilestoneStatus,
    NewContract, NewMilestone, ProjectId, QuotationId, RiskLevel, UserId,
};
use crate::domain::ports::ContractRepository;
use crate::entity::{contract_milestones, contracts};
use crate::error::DomainError;

/// PostgreSQL implementation of ContractRepository
pub struct PostgresContractRepository {
    db: DatabaseConnection,
}

impl PostgresContractRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContractRepository for PostgresContractRepository {
    async fn find_by_id(&self, id: &ContractId) -> Result<Option<Contract>, DomainError> {
        let result = contracts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_quotation(
        &self,
        quotation_id: &QuotationId,
    ) -> Result<Option<Contract>, DomainError> {
        let result = contracts::Entity::find()
            .filter(contracts::Column::QuotationId.eq(quotation_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_party(&self, user_id: &UserId) -> Result<Vec<Contract>, DomainError> {
        let results = contracts::Entity::find()
            .filter(
                Condition::any()
                    .add(contracts::Column::ClientId.eq(user_id.0))
                    .add(contracts::Column::ProviderId.eq(user_id.0)),
            )
            .order_by_desc(contracts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, contract: &NewContract) -> Result<Contract, DomainError> {
        let terms = serde_json::to_value(&contract.terms)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let model = contracts::ActiveModel {
            id: Set(Uuid::new_v4()),
            quotation_id: Set(contract.quotation_id.0),
            project_id: Set(contract.project_id.0),
            client_id: Set(contract.client_id.0),
            provider_id: Set(contract.provider_id.0),
            terms: Set(terms),
            total_amount_cents: Set(contract.total_amount_cents),
            status: Set(ContractStatus::PendingSignatures.to_string()),
            client_signed_at: Set(None),
            provider_signed_at: Set(None),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn set_client_signed(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let model = contracts::ActiveModel {
            id: Set(id.0),
            client_signed_at: Set(Some(at.fixed_offset())),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn set_provider_signed(
        &self,
        id: &ContractId,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let model = contracts::ActiveModel {
            id: Set(id.0),
            provider_signed_at: Set(Some(at.fixed_offset())),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn update_status(
        &self,
        id: &ContractId,
        status: ContractStatus,
    ) -> Result<(), DomainError> {
        let model = contracts::ActiveModel {
            id: Set(id.0),
            status: Set(status.to_string()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_milestones(
        &self,
        contract_id: &ContractId,
    ) -> Result<Vec<Milestone>, DomainError> {
        let results = contract_milestones::Entity::find()
            .filter(contract_milestones::Column::ContractId.eq(contract_id.0))
            .order_by_asc(contract_milestones::Column::Sequence)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create_milestones(
        &self,
        milestones: &[NewMilestone],
    ) -> Result<Vec<Milestone>, DomainError> {
        let mut created = Vec::with_capacity(milestones.len());
        for milestone in milestones {
            let model = contract_milestones::ActiveModel {
                id: Set(Uuid::new_v4()),
                contract_id: Set(milestone.contract_id.0),
                sequence: Set(milestone.sequence),
                description: Set(milestone.description.clone()),
                amount_cents: Set(milestone.amount_cents),
                due_date: Set(milestone.due_date.fixed_offset()),
                status: Set(MilestoneStatus::Pending.to_string()),
                paid_at: Set(None),
            };

            let result = model
                .insert(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;
            created.push(result.into());
        }
        Ok(created)
    }

    async fn mark_milestone_paid(
        &self,
        contract_id: &ContractId,
        sequence: i32,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let existing = contract_milestones::Entity::find()
            .filter(contract_milestones::Column::ContractId.eq(contract_id.0))
            .filter(contract_milestones::Column::Sequence.eq(sequence))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| {
                DomainError::NotFound(format!(
                    "Milestone {} on contract {}",
                    sequence, contract_id
                ))
            })?;

        let model = contract_milestones::ActiveModel {
            id: Set(existing.id),
            status: Set(MilestoneStatus::Paid.to_string()),
            paid_at: Set(Some(at.fixed_offset())),
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
impl From<contracts::Model> for Contract {
    fn from(model: contracts::Model) -> Self {
        // Terms are written by us as ContractTerms JSON; a decode failure
        // means a corrupted row, surfaced as high-risk defaults.
        let terms: ContractTerms =
            serde_json::from_value(model.terms).unwrap_or_else(|_| ContractTerms {
                scope: String::new(),
                total_amount_cents: model.total_amount_cents,
                estimated_days: 0,
                risk_level: RiskLevel::High,
                termination_notice_days: 14,
                payment_schedule_percents: vec![],
            });

        Contract {
            id: ContractId(model.id),
            quotation_id: QuotationId(model.quotation_id),
            project_id: ProjectId(model.project_id),
            client_id: UserId(model.client_id),
            provider_id: UserId(model.provider_id),
            terms,
            total_amount_cents: model.total_amount_cents,
            status: model
                .status
                .parse()
                .unwrap_or(ContractStatus::PendingSignatures),
            client_signed_at: model.client_signed_at.map(|t| t.with_timezone(&Utc)),
            provider_signed_at: model.provider_signed_at.map(|t| t.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<contract_milestones::Model> for Milestone {
    fn from(model: contract_milestones::Model) -> Self {
        Milestone {
            id: MilestoneId(model.id),
            contract_id: ContractId(model.contract_id),
            sequence: model.sequence,
            description: model.description,
            amount_cents: model.amount_cents,
            due_date: model.due_date.with_timezone(&Utc),
            status: model.status.parse().unwrap_or(MilestoneStatus::Pending),
            paid_at: model.paid_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}
