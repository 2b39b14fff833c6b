//! Persistence for lifetime purchases.

use async_trait::async_trait;

use crate::domain::entitlement::Purchase;
use crate::domain::foundation::{DomainError, GameId, PurchaseId, UserId};

/// Persistence operations on lifetime purchases.
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Fetches the user's purchase of a game, if any.
    async fn find_by_user_and_game(
        &self,
        user_id: &UserId,
        game_id: &GameId,
    ) -> Result<Option<Purchase>, DomainError>;

    /// Inserts a new purchase row.
    async fn insert(&self, purchase: &Purchase) -> Result<(), DomainError>;

    /// Refreshes the payment reference on an existing purchase. Paying twice
    /// for the same game must not create a second row.
    async fn update_payment_ref(
        &self,
        purchase_id: &PurchaseId,
        payment_ref: Option<&str>,
    ) -> Result<(), DomainError>;
}
