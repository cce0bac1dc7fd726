//! Due-diligence handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::{DueDiligenceReport, QuotationId, User};
use crate::error::AppError;
use crate::AppState;

/// Request to run due diligence for an accepted quotation
#[derive(Debug, Deserialize)]
pub struct RunDueDiligenceRequest {
    pub quotation_id: Uuid,
}

/// POST /due-diligence/run
///
/// Run the verification pipeline for an accepted quotation. Project owner
/// only, idempotent per quotation.
pub async fn run_due_diligence(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<RunDueDiligenceRequest>,
) -> Result<Json<DueDiligenceReport>, AppError> {
    Ok(Json(
        state
            .due_diligence_service
            .run(&user, &QuotationId(req.quotation_id))
            .await?,
    ))
}

/// GET /quotations/:id/due-diligence
pub async fn get_due_diligence(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(quotation_id): Path<Uuid>,
) -> Result<Json<DueDiligenceReport>, AppError> {
    Ok(Json(
        state
            .due_diligence_service
            .get(&user, &QuotationId(quotation_id))
            .await?,
    ))
}
