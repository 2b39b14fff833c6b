//! Mock authentication adapter for testing.
//!
//! Implements the `SessionValidator` port from a token-to-user map, avoiding
//! a live identity service in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Mock session validator. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    force_unavailable: RwLock<bool>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.write().unwrap().insert(token.into(), user);
        self
    }

    /// Adds a valid token with a fresh test user, returning its id.
    pub fn with_token(self, token: impl Into<String>) -> (Self, UserId) {
        let user = AuthenticatedUser::new(UserId::new(), Some("test@example.com".to_string()));
        let id = user.id;
        (self.with_user(token, user), id)
    }

    /// Makes every validation fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.force_unavailable.write().unwrap() = unavailable;
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if *self.force_unavailable.read().unwrap() {
            return Err(AuthError::ServiceUnavailable("mock outage".to_string()));
        }
        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
