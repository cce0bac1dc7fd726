//! Project handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::{CreateProject, PageParams};
use crate::domain::entities::{Project, ProjectId, User};
use crate::error::AppError;
use crate::AppState;

/// Request to post a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub sap_module: String,
    pub budget_min_cents: i64,
    pub budget_max_cents: i64,
    pub expected_duration_days: i32,
}

/// POST /projects
///
/// Post a new project. Clients with completed onboarding only.
pub async fn create_project(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<Project>, AppError> {
    let project = state
        .project_service
        .create(
            &user,
            CreateProject {
                title: req.title,
                description: req.description,
                sap_module: req.sap_module,
                budget_min_cents: req.budget_min_cents,
                budget_max_cents: req.budget_max_cents,
                expected_duration_days: req.expected_duration_days,
            },
        )
        .await?;
    Ok(Json(project))
}

/// GET /projects
///
/// Browse open projects, paginated.
pub async fn list_open_projects(
    State(state): State<AppState>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.project_service.list_open(page).await?))
}

/// GET /projects/my
pub async fn list_my_projects(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.project_service.list_mine(&user).await?))
}

/// GET /projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(state.project_service.get(&ProjectId(id)).await?))
}

/// POST /projects/:id/cancel
///
/// Cancel an open project. Owner only.
pub async fn cancel_project(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    Ok(Json(
        state.project_service.cancel(&user, &ProjectId(id)).await?,
    ))
}
