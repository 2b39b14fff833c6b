//! Game read-model and availability gating.

use serde::{Deserialize, Serialize};

use crate::domain::checkout::{CheckoutError, CheckoutMode};
use crate::domain::foundation::GameId;

/// Catalog availability of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Available,
    ComingSoon,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Available => "available",
            GameStatus::ComingSoon => "coming_soon",
        }
    }
}

/// The slice of a catalog entry that checkout needs. Read-only here; the
/// catalog itself is managed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    pub slug: String,
    /// Rental price in minor currency units.
    pub price_cents: i64,
    /// Lifetime price in minor currency units, when offered.
    pub lifetime_price_cents: Option<i64>,
    pub rental_duration_days: i32,
    pub is_lifetime_available: bool,
    pub status: GameStatus,
}

impl Game {
    /// Checks the mode/availability rules for starting a checkout.
    ///
    /// A `coming_soon` game cannot be rented, and lifetime mode requires the
    /// lifetime flag.
    pub fn ensure_mode_allowed(&self, mode: CheckoutMode) -> Result<(), CheckoutError> {
        if self.status == GameStatus::ComingSoon && mode == CheckoutMode::Rental {
            return Err(CheckoutError::GameUnavailable);
        }
        if mode == CheckoutMode::Lifetime && !self.is_lifetime_available {
            return Err(CheckoutError::LifetimeNotAvailable);
        }
        Ok(())
    }

    /// Charge amount for the given mode: the lifetime price when buying
    /// lifetime access and one is set, the rental price otherwise.
    pub fn charge_amount(&self, mode: CheckoutMode) -> i64 {
        match mode {
            CheckoutMode::Lifetime => self.lifetime_price_cents.unwrap_or(self.price_cents),
            CheckoutMode::Rental => self.price_cents,
        }
    }
}

/// Duration/availability snapshot of a game joined onto a checkout session
/// during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEntitlementSnapshot {
    pub rental_duration_days: Option<i32>,
    pub is_lifetime_available: bool,
}

impl GameEntitlementSnapshot {
    /// Rental duration fallback when the catalog row carries none.
    pub const DEFAULT_RENTAL_DURATION_DAYS: i32 = 30;

    pub fn duration_days(&self) -> i32 {
        self.rental_duration_days
            .unwrap_or(Self::DEFAULT_RENTAL_DURATION_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(status: GameStatus, lifetime: bool) -> Game {
        Game {
            id: GameId::new(),
            title: "Starlit Foundry".to_string(),
            slug: "starlit-foundry".to_string(),
            price_cents: 1990,
            lifetime_price_cents: lifetime.then_some(7990),
            rental_duration_days: 14,
            is_lifetime_available: lifetime,
            status,
        }
    }

    #[test]
    fn coming_soon_blocks_rental() {
        let g = game(GameStatus::ComingSoon, false);
        assert!(matches!(
            g.ensure_mode_allowed(CheckoutMode::Rental),
            Err(CheckoutError::GameUnavailable)
        ));
    }

    #[test]
    fn lifetime_requires_flag() {
        let g = game(GameStatus::Available, false);
        assert!(matches!(
            g.ensure_mode_allowed(CheckoutMode::Lifetime),
            Err(CheckoutError::LifetimeNotAvailable)
        ));
    }

    #[test]
    fn available_game_allows_rental() {
        let g = game(GameStatus::Available, false);
        assert!(g.ensure_mode_allowed(CheckoutMode::Rental).is_ok());
    }

    #[test]
    fn coming_soon_game_with_flag_allows_lifetime() {
        // Pre-orders of lifetime access are permitted; only rental is gated
        // on general availability.
        let g = game(GameStatus::ComingSoon, true);
        assert!(g.ensure_mode_allowed(CheckoutMode::Lifetime).is_ok());
    }

    #[test]
    fn charge_amount_prefers_lifetime_price() {
        let g = game(GameStatus::Available, true);
        assert_eq!(g.charge_amount(CheckoutMode::Lifetime), 7990);
        assert_eq!(g.charge_amount(CheckoutMode::Rental), 1990);
    }

    #[test]
    fn charge_amount_falls_back_to_rental_price() {
        let mut g = game(GameStatus::Available, true);
        g.lifetime_price_cents = None;
        assert_eq!(g.charge_amount(CheckoutMode::Lifetime), 1990);
    }

    #[test]
    fn snapshot_defaults_duration_to_thirty_days() {
        let snap = GameEntitlementSnapshot {
            rental_duration_days: None,
            is_lifetime_available: false,
        };
        assert_eq!(snap.duration_days(), 30);
    }
}
