//! Rental entitlement and the expiry stacking rule.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::CheckoutMode;
use crate::domain::foundation::{GameId, RentalId, Timestamp, UserId};

/// Lifecycle state of a rental row. Rows are never deleted, only flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Expired,
    Refunded,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::Expired => "expired",
            RentalStatus::Refunded => "refunded",
        }
    }
}

/// An active or historical rental window. At most one active row exists per
/// (user, game) pair; renewals extend that row in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    pub id: RentalId,
    pub user_id: UserId,
    pub game_id: GameId,
    /// Checkout mode the grant came from. Rentals only ever come from rental
    /// sessions, but the row records it like the session row does.
    pub mode: CheckoutMode,
    pub starts_at: Timestamp,
    /// None means unlimited.
    pub expires_at: Option<Timestamp>,
    pub status: RentalStatus,
    pub payment_ref: Option<String>,
}

impl Rental {
    /// Creates a fresh active rental starting now.
    pub fn start(
        user_id: UserId,
        game_id: GameId,
        now: Timestamp,
        duration_days: i32,
        payment_ref: Option<String>,
    ) -> Self {
        Self {
            id: RentalId::new(),
            user_id,
            game_id,
            mode: CheckoutMode::Rental,
            starts_at: now,
            expires_at: Some(now.add_days(i64::from(duration_days))),
            status: RentalStatus::Active,
            payment_ref,
        }
    }

    /// Expiry after renewing this rental for `duration_days` more.
    ///
    /// When the current expiry is still in the future the new window stacks
    /// on top of it, so a renewal never wastes unexpired time. An expiry in
    /// the past, or an unlimited rental, restarts the window from now.
    pub fn renewed_expiry(&self, now: Timestamp, duration_days: i32) -> Timestamp {
        let base = match self.expires_at {
            Some(expiry) if expiry.is_after(&now) => expiry,
            _ => now,
        };
        base.add_days(i64::from(duration_days))
    }
}
