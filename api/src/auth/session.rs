//! Session authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::error::AppError;
use crate::AppState;

/// Extract the bearer token from the Authorization header
fn extract_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Authentication middleware
///
/// Resolves the session token to its user and injects the User into
/// request extensions. Protected routes go through this middleware.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request).ok_or(AppError::Unauthorized)?;

    let user = state
        .account_service
        .authenticate(token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Update last seen (fire and forget, log errors)
    let user_id = user.id;
    let account_service = state.account_service.clone();
    tokio::spawn(async move {
        if let Err(e) = account_service.touch(&user_id).await {
            tracing::warn!(error = %e, user_id = %user_id, "Failed to update last_seen");
        }
    });

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
