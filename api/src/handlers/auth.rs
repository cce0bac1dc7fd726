//! Authentication handlers
//!
//! Signup, login, logout, and the current-user endpoint.

use axum::{extract::State, http::HeaderMap, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{User, UserRole};
use crate::error::AppError;
use crate::AppState;

/// Request to create an account
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub password: String,
}

/// Request to log in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying the session token; the token is shown only here
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// POST /auth/signup
///
/// Create a user and issue the first session token.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (user, token) = state
        .account_service
        .signup(&req.email, &req.display_name, req.role, &req.password)
        .await?;
    Ok(Json(AuthResponse { token, user }))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (user, token) = state.account_service.login(&req.email, &req.password).await?;
    Ok(Json(AuthResponse { token, user }))
}

/// POST /auth/logout
///
/// Revoke the presented session token.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;
    state.account_service.logout(token).await?;
    Ok(Json(serde_json::json!({ "status": "logged_out" })))
}

/// GET /me
pub async fn me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
