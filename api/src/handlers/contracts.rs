//! Contract handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::ContractView;
use crate::domain::entities::{Contract, ContractId, QuotationId, User};
use crate::error::AppError;
use crate::AppState;

/// Request to generate a contract from an accepted quotation
#[derive(Debug, Deserialize)]
pub struct CreateContractRequest {
    pub quotation_id: Uuid,
}

/// POST /contracts/create
///
/// Generate the contract for an accepted quotation. Requires a
/// due-diligence report; project owner only.
pub async fn create_contract(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateContractRequest>,
) -> Result<Json<ContractView>, AppError> {
    Ok(Json(
        state
            .contract_service
            .create(&user, &QuotationId(req.quotation_id))
            .await?,
    ))
}

/// POST /contracts/:id/sign
///
/// Record the caller's signature. Both signatures activate the contract.
pub async fn sign_contract(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractView>, AppError> {
    Ok(Json(
        state.contract_service.sign(&user, &ContractId(id)).await?,
    ))
}

/// POST /contracts/:id/milestones/:seq/pay
///
/// Pay the next milestone in sequence. Client only.
pub async fn pay_milestone(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((id, sequence)): Path<(Uuid, i32)>,
) -> Result<Json<ContractView>, AppError> {
    Ok(Json(
        state
            .contract_service
            .pay_milestone(&user, &ContractId(id), sequence)
            .await?,
    ))
}

/// POST /contracts/:id/complete
///
/// Complete the contract once every milestone is paid.
pub async fn complete_contract(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractView>, AppError> {
    Ok(Json(
        state
            .contract_service
            .complete(&user, &ContractId(id))
            .await?,
    ))
}

/// POST /contracts/:id/terminate
///
/// Terminate a pending or active contract. Parties only; the notice period
/// in the terms applies.
pub async fn terminate_contract(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractView>, AppError> {
    Ok(Json(
        state
            .contract_service
            .terminate(&user, &ContractId(id))
            .await?,
    ))
}

/// GET /contracts/my
pub async fn list_my_contracts(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Contract>>, AppError> {
    Ok(Json(state.contract_service.list_mine(&user).await?))
}

/// GET /contracts/:id
pub async fn get_contract(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractView>, AppError> {
    Ok(Json(
        state.contract_service.view(&user, &ContractId(id)).await?,
    ))
}
