//! Persistence for checkout sessions.

use async_trait::async_trait;

use crate::domain::catalog::GameEntitlementSnapshot;
use crate::domain::checkout::{CheckoutSession, CorrelationId};
use crate::domain::foundation::{CheckoutSessionId, DomainError, UserId};

/// A session joined with the entitlement-relevant slice of its game, as
/// reconciliation reads it.
#[derive(Debug, Clone)]
pub struct SessionWithGame {
    pub session: CheckoutSession,
    pub game: GameEntitlementSnapshot,
}

/// Persistence operations on checkout sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Inserts a freshly created pending session.
    async fn insert(&self, session: &CheckoutSession) -> Result<(), DomainError>;

    /// Fetches a session by id, scoped to its owner.
    async fn find_by_id_for_user(
        &self,
        session_id: &CheckoutSessionId,
        user_id: &UserId,
    ) -> Result<Option<CheckoutSession>, DomainError>;

    /// Fetches a session by its correlation id, joined with the game fields
    /// reconciliation needs.
    async fn find_by_correlation_id(
        &self,
        correlation_id: &CorrelationId,
    ) -> Result<Option<SessionWithGame>, DomainError>;

    /// Atomically flips a pending session to paid, recording the payment
    /// reference.
    ///
    /// Returns `false` when the session was not pending anymore, which is
    /// how concurrent deliveries of the same event lose the race. This
    /// compare-and-set is the idempotency gate: grants only follow a `true`.
    async fn mark_paid(
        &self,
        session_id: &CheckoutSessionId,
        payment_ref: Option<&str>,
    ) -> Result<bool, DomainError>;
}
