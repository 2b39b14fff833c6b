//! Error types for checkout session operations.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

use super::CorrelationEncodeError;

/// Errors that occur while creating or reading checkout sessions.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Request body carried no game ID.
    #[error("gameId is required")]
    MissingGameId,

    /// The referenced game does not exist.
    #[error("Game not found")]
    GameNotFound,

    /// The game is announced but not yet rentable.
    #[error("Game is not available")]
    GameUnavailable,

    /// The game cannot be bought outright.
    #[error("Lifetime purchase is not available for this game")]
    LifetimeNotAvailable,

    /// The requested session does not exist or belongs to another user.
    #[error("Checkout session not found")]
    SessionNotFound,

    /// An identifier cannot be embedded in a correlation ID.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] CorrelationEncodeError),

    /// The entitlement store failed.
    #[error("Store error: {0}")]
    Store(#[from] DomainError),
}

impl CheckoutError {
    /// Machine-readable error code returned in response bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            CheckoutError::MissingGameId => "gameId_required",
            CheckoutError::GameNotFound => "game_not_found",
            CheckoutError::GameUnavailable => "game_unavailable",
            CheckoutError::LifetimeNotAvailable => "lifetime_not_available",
            CheckoutError::SessionNotFound => "session_not_found",
            CheckoutError::InvalidIdentifier(_) => "invalid_identifier",
            CheckoutError::Store(_) => "internal_error",
        }
    }

    /// HTTP status for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::MissingGameId => StatusCode::BAD_REQUEST,
            CheckoutError::GameNotFound | CheckoutError::SessionNotFound => StatusCode::NOT_FOUND,
            CheckoutError::GameUnavailable | CheckoutError::LifetimeNotAvailable => {
                StatusCode::CONFLICT
            }
            CheckoutError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            CheckoutError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
