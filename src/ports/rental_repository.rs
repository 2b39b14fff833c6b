//! Persistence for rental entitlements.

use async_trait::async_trait;

use crate::domain::entitlement::Rental;
use crate::domain::foundation::{DomainError, GameId, RentalId, Timestamp, UserId};

/// Persistence operations on rentals.
///
/// At most one active rental exists per (user, game); renewals extend that
/// row instead of inserting a second one.
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Fetches the user's active rental of a game, if any.
    async fn find_active(
        &self,
        user_id: &UserId,
        game_id: &GameId,
    ) -> Result<Option<Rental>, DomainError>;

    /// Inserts a new rental row.
    async fn insert(&self, rental: &Rental) -> Result<(), DomainError>;

    /// Extends an existing rental to a new expiry, refreshing the payment
    /// reference and reactivating the row.
    async fn extend(
        &self,
        rental_id: &RentalId,
        new_expiry: Timestamp,
        payment_ref: Option<&str>,
    ) -> Result<(), DomainError>;
}
