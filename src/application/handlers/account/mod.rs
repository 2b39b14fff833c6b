//! Account-facing command handlers: support tickets, release notifications,
//! preference updates.

mod create_ticket;
mod notify_upcoming;
mod update_preferences;

pub use create_ticket::{CreateTicketCommand, CreateTicketHandler};
pub use notify_upcoming::{NotifyUpcomingCommand, NotifyUpcomingHandler};
pub use update_preferences::{UpdatePreferencesCommand, UpdatePreferencesHandler};

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Failures of the account-facing endpoints.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("subject and message are required")]
    SubjectAndMessageRequired,

    #[error("gameId is required")]
    MissingGameId,

    #[error("email is required")]
    EmailRequired,

    #[error("Store error: {0}")]
    Store(#[from] DomainError),
}

impl AccountError {
    /// Machine-readable error code returned in response bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccountError::SubjectAndMessageRequired => "subject_and_message_required",
            AccountError::MissingGameId => "gameId_required",
            AccountError::EmailRequired => "email_required",
            AccountError::Store(_) => "internal_error",
        }
    }

    /// HTTP status for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::SubjectAndMessageRequired
            | AccountError::MissingGameId
            | AccountError::EmailRequired => StatusCode::BAD_REQUEST,
            AccountError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
