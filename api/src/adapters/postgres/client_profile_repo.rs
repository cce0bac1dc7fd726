//! PostgreSQL adapter for ClientProfileRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::domain::entities::{ClientProfile, ClientProfileId, NewClientProfile, UserId};
use crate::domain::ports::ClientProfileRepository;
use crate::entity::client_profiles;
use crate::error::DomainError;

/// PostgreSQL implementation of ClientProfileRepository
pub struct PostgresClientProfileRepository {
    db: DatabaseConnection,
}

impl PostgresClientProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientProfileRepository for PostgresClientProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<ClientProfile>, DomainError> {
        let result = client_profiles::Entity::find()
            .filter(client_profiles::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, profile: &NewClientProfile) -> Result<ClientProfile, DomainError> {
        let now = Utc::now().fixed_offset();
        let model = client_profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(profile.user_id.0),
            company_name: Set(None),
            industry: Set(None),
            company_size: Set(None),
            sap_modules_needed: Set(serde_json::json!([])),
            budget_min_cents: Set(None),
            budget_max_cents: Set(None),
            preferred_start: Set(None),
            onboarding_step: Set(1),
            completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn save(&self, profile: &ClientProfile) -> Result<ClientProfile, DomainError> {
        let model = client_profiles::ActiveModel {
            id: Set(profile.id.0),
            user_id: Set(profile.user_id.0),
            company_name: Set(profile.company_name.clone()),
            industry: Set(profile.industry.clone()),
            company_size: Set(profile.company_size.map(|s| s.to_string())),
            sap_modules_needed: Set(serde_json::json!(profile.sap_modules_needed)),
            budget_min_cents: Set(profile.budget_min_cents),
            budget_max_cents: Set(profile.budget_max_cents),
            preferred_start: Set(profile.preferred_start.map(|t| t.fixed_offset())),
            onboarding_step: Set(profile.onboarding_step),
            completed: Set(profile.completed),
            created_at: Set(profile.created_at.fixed_offset()),
            updated_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<client_profiles::Model> for ClientProfile {
    fn from(model: client_profiles::Model) -> Self {
        ClientProfile {
            id: ClientProfileId(model.id),
            user_id: UserId(model.user_id),
            company_name: model.company_name,
            industry: model.industry,
            company_size: model.company_size.and_then(|s| s.parse().ok()),
            sap_modules_needed: serde_json::from_value(model.sap_modules_needed)
                .unwrap_or_default(),
            budget_min_cents: model.budget_min_cents,
            budget_max_cents: model.budget_max_cents,
            preferred_start: model.preferred_start.map(|t| t.with_timezone(&Utc)),
            onboarding_step: model.onboarding_step,
            completed: model.completed,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
