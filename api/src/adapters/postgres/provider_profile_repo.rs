//! PostgreSQL adapter for ProviderProfileRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::domain::entities::{NewProviderProfile, ProviderProfile, ProviderProfileId, UserId};
use crate::domain::ports::ProviderProfileRepository;
use crate::entity::provider_profiles;
use crate::error::DomainError;

/// PostgreSQL implementation of ProviderProfileRepository
pub struct PostgresProviderProfileRepository {
    db: DatabaseConnection,
}

impl PostgresProviderProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProviderProfileRepository for PostgresProviderProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProviderProfile>, DomainError> {
        let result = provider_profiles::Entity::find()
            .filter(provider_profiles::Column::UserId.eq(user_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, profile: &NewProviderProfile) -> Result<ProviderProfile, DomainError> {
        let now = Utc::now().fixed_offset();
        let model = provider_profiles::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(profile.user_id.0),
            firm_name: Set(None),
            registration_number: Set(None),
            country: Set(None),
            years_experience: Set(None),
            consultant_count: Set(None),
            sap_modules: Set(serde_json::json!([])),
            certifications: Set(serde_json::json!([])),
            hourly_rate_min_cents: Set(None),
            hourly_rate_max_cents: Set(None),
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

    async fn save(&self, profile: &ProviderProfile) -> Result<ProviderProfile, DomainError> {
        let model = provider_profiles::ActiveModel {
            id: Set(profile.id.0),
            user_id: Set(profile.user_id.0),
            firm_name: Set(profile.firm_name.clone()),
            registration_number: Set(profile.registration_number.clone()),
            country: Set(profile.country.clone()),
            years_experience: Set(profile.years_experience),
            consultant_count: Set(profile.consultant_count),
            sap_modules: Set(serde_json::json!(profile.sap_modules)),
            certifications: Set(serde_json::json!(profile.certifications)),
            hourly_rate_min_cents: Set(profile.hourly_rate_min_cents),
            hourly_rate_max_cents: Set(profile.hourly_rate_max_cents),
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
impl From<provider_profiles::Model> for ProviderProfile {
    fn from(model: provider_profiles::Model) -> Self {
        ProviderProfile {
            id: ProviderProfileId(model.id),
            user_id: UserId(model.user_id),
            firm_name: model.firm_name,
            registration_number: model.registration_number,
            country: model.country,
            years_experience: model.years_experience,
            consultant_count: model.consultant_count,
            sap_modules: serde_json::from_value(model.sap_modules).unwrap_or_default(),
            certifications: serde_json::from_value(model.certifications).unwrap_or_default(),
            hourly_rate_min_cents: model.hourly_rate_min_cents,
            hourly_rate_max_cents: model.hourly_rate_max_cents,
            onboarding_step: model.onboarding_step,
            completed: model.completed,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
