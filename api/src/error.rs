//! Unified error types for the SapBridge API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `VerifierError`: Verification bureau client errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Verification bureau client errors
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Bureau error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Provider record not found: {0}")]
    ProviderNotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid bureau credentials")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Verifier error: {0}")]
    Verifier(#[from] VerifierError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Fields(Vec<FieldError>),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, fields) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()), None)
            }
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", Some(msg.clone()), None)
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
            AppError::Verifier(e) => {
                tracing::error!("Verifier error: {}", e);
                match e {
                    VerifierError::Unauthorized => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Verification service error",
                        None,
                        None,
                    ),
                    VerifierError::ProviderNotFound(_) => (
                        StatusCode::NOT_FOUND,
                        "Verification record not found",
                        None,
                        None,
                    ),
                    VerifierError::RateLimited => {
                        (StatusCode::TOO_MANY_REQUESTS, "Rate limited", None, None)
                    }
                    VerifierError::Api { status, message } => {
                        let http_status = if *status == 404 {
                            StatusCode::NOT_FOUND
                        } else {
                            StatusCode::BAD_GATEWAY
                        };
                        (
                            http_status,
                            "Verification service error",
                            Some(message.clone()),
                            None,
                        )
                    }
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Verification service error",
                        None,
                        None,
                    ),
                }
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad request",
                Some(msg.clone()),
                None,
            ),
            AppError::Fields(fields) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                None,
                Some(fields.clone()),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None, None),
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, "Forbidden", Some(msg.clone()), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
            fields,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_map_to_bad_request() {
        let err = AppError::Fields(vec![FieldError::new("email", "already registered")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::Domain(DomainError::NotFound("contract".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = AppError::Domain(DomainError::Conflict("already signed".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_session_maps_to_401() {
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
