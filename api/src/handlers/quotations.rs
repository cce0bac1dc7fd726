//! Quotation handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::{PageParams, QuotationListing, SubmitQuotation};
use crate::domain::entities::{ProjectId, Quotation, QuotationId, User};
use crate::error::AppError;
use crate::AppState;

/// Request to submit a quotation on a project
#[derive(Debug, Deserialize)]
pub struct SubmitQuotationRequest {
    pub amount_cents: i64,
    pub estimated_days: i32,
    pub proposal: String,
}

/// POST /projects/:id/quotations
///
/// Submit a quotation. Providers with completed onboarding only.
pub async fn submit_quotation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<SubmitQuotationRequest>,
) -> Result<Json<Quotation>, AppError> {
    let quotation = state
        .quotation_service
        .submit(
            &user,
            SubmitQuotation {
                project_id: ProjectId(project_id),
                amount_cents: req.amount_cents,
                estimated_days: req.estimated_days,
                proposal: req.proposal,
            },
        )
        .await?;
    Ok(Json(quotation))
}

/// GET /projects/:id/quotations
///
/// All quotations on a project plus comparison stats. Owner only.
pub async fn list_project_quotations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(project_id): Path<Uuid>,
) -> Result<Json<QuotationListing>, AppError> {
    Ok(Json(
        state
            .quotation_service
            .list_for_project(&user, &ProjectId(project_id))
            .await?,
    ))
}

/// GET /quotations/my
pub async fn list_my_quotations(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<Quotation>>, AppError> {
    Ok(Json(state.quotation_service.list_mine(&user, page).await?))
}

/// POST /quotations/:id/accept
///
/// Accept a pending quotation; all other pending quotations on the project
/// are rejected. Project owner only.
pub async fn accept_quotation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Quotation>, AppError> {
    Ok(Json(
        state
            .quotation_service
            .accept(&user, &QuotationId(id))
            .await?,
    ))
}

/// POST /quotations/:id/reject
pub async fn reject_quotation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Quotation>, AppError> {
    Ok(Json(
        state
            .quotation_service
            .reject(&user, &QuotationId(id))
            .await?,
    ))
}

/// POST /quotations/:id/withdraw
pub async fn withdraw_quotation(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<Quotation>, AppError> {
    Ok(Json(
        state
            .quotation_service
            .withdraw(&user, &QuotationId(id))
            .await?,
    ))
}
