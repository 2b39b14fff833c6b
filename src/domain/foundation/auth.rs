//! Authentication value objects.

use thiserror::Error;

use super::UserId;

/// A caller whose bearer token was accepted by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's unique identifier.
    pub id: UserId,
    /// The user's email address, when the identity service provides one.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self { id, email }
    }
}

/// Errors raised while resolving a bearer token to a user.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token missing, malformed, expired, or rejected by the identity service.
    #[error("Invalid or missing credentials")]
    InvalidToken,

    /// The identity service could not be reached or returned a server error.
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if the failure is on our side rather than the caller's.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
