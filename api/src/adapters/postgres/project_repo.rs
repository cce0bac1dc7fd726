//! PostgreSQL adapter for ProjectRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{NewProject, Project, ProjectId, ProjectStatus, UserId};
use crate::domain::ports::ProjectRepository;
use crate::entity::projects;
use crate::error::DomainError;

/// PostgreSQL implementation of ProjectRepository
pub struct PostgresProjectRepository {
    db: DatabaseConnection,
}

impl PostgresProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let result = projects::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_open(&self, limit: u64, offset: u64) -> Result<Vec<Project>, DomainError> {
        let results = projects::Entity::find()
            .filter(projects::Column::Status.eq(ProjectStatus::Open.to_string()))
            .order_by_desc(projects::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_client(&self, client_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let results = projects::Entity::find()
            .filter(projects::Column::ClientId.eq(client_id.0))
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, project: &NewProject) -> Result<Project, DomainError> {
        let model = projects::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(project.client_id.0),
            title: Set(project.title.clone()),
            description: Set(project.description.clone()),
            sap_module: Set(project.sap_module.clone()),
            budget_min_cents: Set(project.budget_min_cents),
            budget_max_cents: Set(project.budget_max_cents),
            expected_duration_days: Set(project.expected_duration_days),
            status: Set(ProjectStatus::Open.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_status(
        &self,
        id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<(), DomainError> {
        let model = projects::ActiveModel {
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
}

/// Convert SeaORM model to domain entity
impl From<projects::Model> for Project {
    fn from(model: projects::Model) -> Self {
        Project {
            id: ProjectId(model.id),
            client_id: UserId(model.client_id),
            title: model.title,
            description: model.description,
            sap_module: model.sap_module,
            budget_min_cents: model.budget_min_cents,
            budget_max_cents: model.budget_max_cents,
            expected_duration_days: model.expected_duration_days,
            status: model.status.parse().unwrap_or(ProjectStatus::Open),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
