//! Onboarding wizard handlers

use axum::{extract::State, Extension, Json};

use crate::app::{ClientStepPayload, ProviderStepPayload};
use crate::domain::entities::{ClientProfile, ProviderProfile, User};
use crate::error::AppError;
use crate::AppState;

/// POST /onboarding/client/start
pub async fn start_client(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ClientProfile>, AppError> {
    Ok(Json(state.onboarding_service.start_client(&user).await?))
}

/// POST /onboarding/client/step
///
/// Submit the payload for the current step; advances by exactly one.
pub async fn submit_client_step(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<ClientStepPayload>,
) -> Result<Json<ClientProfile>, AppError> {
    Ok(Json(
        state
            .onboarding_service
            .submit_client_step(&user, payload)
            .await?,
    ))
}

/// GET /onboarding/client
pub async fn client_status(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ClientProfile>, AppError> {
    Ok(Json(state.onboarding_service.client_status(&user).await?))
}

/// POST /onboarding/client/complete
pub async fn complete_client(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ClientProfile>, AppError> {
    Ok(Json(state.onboarding_service.complete_client(&user).await?))
}

/// POST /onboarding/provider/start
pub async fn start_provider(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ProviderProfile>, AppError> {
    Ok(Json(state.onboarding_service.start_provider(&user).await?))
}

/// POST /onboarding/provider/step
pub async fn submit_provider_step(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<ProviderStepPayload>,
) -> Result<Json<ProviderProfile>, AppError> {
    Ok(Json(
        state
            .onboarding_service
            .submit_provider_step(&user, payload)
            .await?,
    ))
}

/// GET /onboarding/provider
pub async fn provider_status(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ProviderProfile>, AppError> {
    Ok(Json(state.onboarding_service.provider_status(&user).await?))
}

/// POST /onboarding/provider/complete
pub async fn complete_provider(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<ProviderProfile>, AppError> {
    Ok(Json(
        state.onboarding_service.complete_provider(&user).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CompanySize;

    #[test]
    fn client_step_payloads_deserialize_by_shape() {
        let company: ClientStepPayload = serde_json::from_str(
            r#"{"company_name":"Acme","industry":"Retail","company_size":"medium"}"#,
        )
        .unwrap();
        assert!(matches!(
            company,
            ClientStepPayload::CompanyInfo {
                company_size: CompanySize::Medium,
                ..
            }
        ));

        let modules: ClientStepPayload =
            serde_json::from_str(r#"{"sap_modules_needed":["FI","MM"]}"#).unwrap();
        assert!(matches!(modules, ClientStepPayload::ModulesNeeded { .. }));

        let budget: ClientStepPayload = serde_json::from_str(
            r#"{"budget_min_cents":100000,"budget_max_cents":500000,"preferred_start":null}"#,
        )
        .unwrap();
        assert!(matches!(budget, ClientStepPayload::BudgetTimeline { .. }));
    }

    #[test]
    fn provider_step_payloads_deserialize_by_shape() {
        let firm: ProviderStepPayload = serde_json::from_str(
            r#"{"firm_name":"Rhine SAP","registration_number":"HRB-1","country":"DE"}"#,
        )
        .unwrap();
        assert!(matches!(firm, ProviderStepPayload::FirmInfo { .. }));

        let rates: ProviderStepPayload = serde_json::from_str(
            r#"{"hourly_rate_min_cents":10000,"hourly_rate_max_cents":20000,"consultant_count":5}"#,
        )
        .unwrap();
        assert!(matches!(rates, ProviderStepPayload::RatesCapacity { .. }));
    }
}
