//! GetSessionHandler - Query handler for reading one of the caller's
//! checkout sessions.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::checkout::{CheckoutError, CheckoutSession};
use crate::domain::foundation::{AuthenticatedUser, CheckoutSessionId};
use crate::ports::SessionRepository;

/// Query for one checkout session, scoped to its owner.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub user: AuthenticatedUser,
    /// Raw session id from the path.
    pub session_id: String,
}

/// Handler for reading checkout sessions.
pub struct GetSessionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    /// Another user's session reads as absent rather than forbidden, so the
    /// endpoint does not leak which ids exist.
    pub async fn handle(&self, query: GetSessionQuery) -> Result<CheckoutSession, CheckoutError> {
        let session_id = CheckoutSessionId::from_str(query.session_id.trim())
            .map_err(|_| CheckoutError::SessionNotFound)?;

        self.sessions
            .find_by_id_for_user(&session_id, &query.user.id)
            .await?
            .ok_or(CheckoutError::SessionNotFound)
    }
}
