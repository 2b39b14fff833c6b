//! Lifetime purchase entitlement.

use crate::domain::foundation::{GameId, PurchaseId, Timestamp, UserId};

/// A lifetime grant of one game to one user. At most one row exists per
/// (user, game) pair; paying again only refreshes the payment reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub id: PurchaseId,
    pub user_id: UserId,
    pub game_id: GameId,
    pub purchased_at: Timestamp,
    pub payment_ref: Option<String>,
}

impl Purchase {
    /// Creates a new purchase recorded at `now`.
    pub fn grant(
        user_id: UserId,
        game_id: GameId,
        now: Timestamp,
        payment_ref: Option<String>,
    ) -> Self {
        Self {
            id: PurchaseId::new(),
            user_id,
            game_id,
            purchased_at: now,
            payment_ref,
        }
    }
}
