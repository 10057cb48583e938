//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` type mapping the service-level error
//! taxonomy onto HTTP responses. All route handlers return
//! `Result<T, AppError>`. Bodies are JSON objects of the shape
//! `{"error": "..."}`.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::services::auth::AuthError;
use crate::services::payments::PaymentError;

/// Application-level error type for the order service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Document-store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Identity operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Payment-method operation failed.
    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Malformed or missing request input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation exists on the surface but is not yet supported.
    #[error("not implemented: {0}")]
    Unsupported(&'static str),
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Store(store) => store_response(store),
            Self::Auth(auth) => match auth {
                AuthError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid email or password".to_string())
                }
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid Token".to_string()),
                AuthError::Store(store) => store_response(store),
                AuthError::PasswordHash(_) | AuthError::Token(_) => internal(),
            },
            Self::Payment(payment) => match payment {
                PaymentError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
                PaymentError::Store(store) => store_response(store),
            },
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Self::Unsupported(operation) => (
                StatusCode::NOT_IMPLEMENTED,
                format!("{operation} is not implemented"),
            ),
        };

        // Don't expose internal error details to clients; log them instead.
        if status.is_server_error() {
            tracing::error!(error = %self, "request error");
        }

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

/// Map a store error onto a response, hiding transport details.
fn store_response(error: &StoreError) -> (StatusCode, String) {
    match error {
        // Stale revision marker: retryable by the caller, never retried here.
        StoreError::Conflict => (
            StatusCode::CONFLICT,
            "document update conflict; retry with fresh data".to_string(),
        ),
        StoreError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
        _ => internal(),
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON extractor whose rejection is an `AppError`.
///
/// The stock `Json` extractor rejects malformed bodies with its own
/// status codes; this wrapper folds every body problem into the 400
/// validation path so the error surface stays uniform.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("gone".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unsupported("order creation")),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::Conflict)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Store(StoreError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_credential_failures_are_uniform_401() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_nested_store_conflict_maps_to_409() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::Store(StoreError::Conflict))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let response = AppError::Store(StoreError::Corrupt("password leaked?".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
