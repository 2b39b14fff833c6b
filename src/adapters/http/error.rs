//! Shared HTTP error response shape.
//!
//! Every failing endpoint answers `{ "error": "<code>" }` with a snake_case
//! code the storefront frontend switches on.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::application::handlers::account::AccountError;
use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::AuthError;
use crate::domain::webhook::WebhookError;

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API error carrying the status and machine-readable code to render.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str) -> Self {
        Self { status, code }
    }

    /// Malformed JSON request body.
    pub fn invalid_json() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_json")
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        if matches!(err, CheckoutError::Store(_)) {
            tracing::error!(error = %err, "checkout request failed on the store");
        }
        Self::new(err.status_code(), err.error_code())
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        if matches!(err, AccountError::Store(_)) {
            tracing::error!(error = %err, "account request failed on the store");
        }
        Self::new(err.status_code(), err.error_code())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_upstream_failure() {
            tracing::error!(error = %err, "identity service unavailable");
            return Self::new(StatusCode::SERVICE_UNAVAILABLE, "identity_unavailable");
        }
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized")
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        if err.is_retryable() {
            tracing::error!(error = %err, "webhook reconciliation failed on the store");
        }
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.error_code())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.code.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}
