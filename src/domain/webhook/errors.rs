//! Webhook reconciliation outcomes and failure classification.

use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Hard failures while reconciling a webhook delivery.
///
/// Only these return a non-2xx status to the provider; everything else
/// acknowledges with 200 so the provider stops redelivering.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature header present but does not match the request body.
    #[error("webhook signature verification failed")]
    InvalidSignature,

    /// Request body is not parseable JSON.
    #[error("webhook body is not valid JSON")]
    InvalidJson,

    /// Persistence failed mid-reconciliation; the provider should retry.
    #[error("store error during reconciliation: {0}")]
    Store(#[from] DomainError),
}

impl WebhookError {
    /// HTTP status returned to the provider.
    pub fn status_code(&self) -> u16 {
        match self {
            WebhookError::InvalidSignature => 401,
            WebhookError::InvalidJson => 400,
            WebhookError::Store(_) => 500,
        }
    }

    /// Whether the provider redelivering the same event could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Store(_))
    }

    /// Stable machine-readable code for the response body and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            WebhookError::InvalidSignature => "invalid_signature",
            WebhookError::InvalidJson => "invalid_json",
            WebhookError::Store(_) => "store_error",
        }
    }
}

/// Why a structurally valid delivery was acknowledged without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Declared event type is not a completion.
    EventType,
    /// No correlation identifier anywhere in the payload.
    MissingCorrelation,
    /// Correlation identifier present but not in our format.
    InvalidCorrelation,
    /// Correlation identifier decodes but matches no session.
    SessionNotFound,
}

impl IgnoreReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::EventType => "event_type",
            IgnoreReason::MissingCorrelation => "missing_correlation",
            IgnoreReason::InvalidCorrelation => "invalid_correlation",
            IgnoreReason::SessionNotFound => "session_not_found",
        }
    }
}

/// Result of reconciling one webhook delivery. All variants acknowledge
/// with 200; the variant drives the response body and log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Session settled and entitlement granted by this delivery.
    Processed {
        correlation_id: String,
        customer_email: Option<String>,
    },
    /// The session was already paid; nothing changed.
    AlreadyProcessed,
    /// Delivery acknowledged without effect.
    Ignored(IgnoreReason),
}
