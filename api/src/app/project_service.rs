//! Project service
//!
//! Client project postings: creation requires a completed client profile,
//! open projects are browsable by providers.

use std::sync::Arc;

use crate::app::PageParams;
use crate::domain::entities::{NewProject, Project, ProjectId, ProjectStatus, User};
use crate::domain::ports::{ClientProfileRepository, ProjectRepository};
use crate::error::{AppError, FieldError};

/// Input for posting a project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub sap_module: String,
    pub budget_min_cents: i64,
    pub budget_max_cents: i64,
    pub expected_duration_days: i32,
}

/// Service for managing project postings
pub struct ProjectService<PR, CR>
where
    PR: ProjectRepository,
    CR: ClientProfileRepository,
{
    projects: Arc<PR>,
    client_profiles: Arc<CR>,
}

impl<PR, CR> ProjectService<PR, CR>
where
    PR: ProjectRepository,
    CR: ClientProfileRepository,
{
    pub fn new(projects: Arc<PR>, client_profiles: Arc<CR>) -> Self {
        Self {
            projects,
            client_profiles,
        }
    }

    /// Post a new project. Requires a completed client profile.
    pub async fn create(&self, user: &User, input: CreateProject) -> Result<Project, AppError> {
        if !user.is_client() {
            return Err(AppError::Forbidden(
                "Only client accounts can post projects".to_string(),
            ));
        }
        let profile = self.client_profiles.find_by_user(&user.id).await?;
        if !profile.map(|p| p.completed).unwrap_or(false) {
            return Err(AppError::Forbidden(
                "Complete onboarding before posting projects".to_string(),
            ));
        }

        let mut fields = Vec::new();
        if input.title.trim().is_empty() || input.title.len() > 200 {
            fields.push(FieldError::new(
                "title",
                "must be between 1 and 200 characters",
            ));
        }
        if input.description.trim().is_empty() {
            fields.push(FieldError::new("description", "must not be empty"));
        }
        if input.sap_module.trim().is_empty() {
            fields.push(FieldError::new("sap_module", "must not be empty"));
        }
        if input.budget_min_cents < 0 {
            fields.push(FieldError::new("budget_min_cents", "must not be negative"));
        }
        if input.budget_max_cents < input.budget_min_cents {
            fields.push(FieldError::new(
                "budget_max_cents",
                "must be at least budget_min_cents",
            ));
        }
        if input.expected_duration_days < 1 {
            fields.push(FieldError::new(
                "expected_duration_days",
                "must be at least 1",
            ));
        }
        if !fields.is_empty() {
            return Err(AppError::Fields(fields));
        }

        let project = self
            .projects
            .create(&NewProject {
                client_id: user.id,
                title: input.title.trim().to_string(),
                description: input.description.trim().to_string(),
                sap_module: input.sap_module.trim().to_uppercase(),
                budget_min_cents: input.budget_min_cents,
                budget_max_cents: input.budget_max_cents,
                expected_duration_days: input.expected_duration_days,
            })
            .await?;

        tracing::info!(project_id = %project.id, client_id = %user.id, "Project posted");
        Ok(project)
    }

    /// Browse open projects, newest first
    pub async fn list_open(&self, page: PageParams) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_open(page.limit(), page.offset()).await?)
    }

    /// A client's own projects, any status
    pub async fn list_mine(&self, user: &User) -> Result<Vec<Project>, AppError> {
        Ok(self.projects.find_by_client(&user.id).await?)
    }

    /// Fetch a single project
    pub async fn get(&self, id: &ProjectId) -> Result<Project, AppError> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    /// Cancel an open project. Only the owner may cancel.
    pub async fn cancel(&self, user: &User, id: &ProjectId) -> Result<Project, AppError> {
        let project = self.get(id).await?;
        if project.client_id != user.id {
            return Err(AppError::Forbidden(
                "Only the project owner can cancel it".to_string(),
            ));
        }
        if !project.status.can_transition_to(ProjectStatus::Cancelled) {
            return Err(AppError::Domain(crate::error::DomainError::Conflict(
                format!("Cannot cancel a project in status {}", project.status),
            )));
        }
        self.projects
            .update_status(id, ProjectStatus::Cancelled)
            .await?;
        self.get(id).await
    }
}
