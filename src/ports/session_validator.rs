//! Validation of end-user bearer tokens against the identity service.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves a bearer token to the authenticated user it belongs to.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validates the token with the identity service.
    ///
    /// # Errors
    ///
    /// `AuthError::InvalidToken` when the service rejects the token,
    /// `AuthError::ServiceUnavailable` when it cannot be reached.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
