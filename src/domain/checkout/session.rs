//! CheckoutSession aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Game;
use crate::domain::checkout::CorrelationId;
use crate::domain::foundation::{CheckoutSessionId, GameId, Timestamp, UserId};

/// Payment window offered to the client when the provider supplies none.
pub const DEFAULT_EXPIRES_IN_SECS: u64 = 1800;

/// What a settled payment buys: a timed rental or a lifetime purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Rental,
    Lifetime,
}

impl CheckoutMode {
    /// Resolves the mode from a request body field.
    ///
    /// Anything that is not exactly `lifetime` is a rental.
    pub fn from_request(raw: Option<&str>) -> Self {
        match raw {
            Some("lifetime") => CheckoutMode::Lifetime,
            _ => CheckoutMode::Rental,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Rental => "rental",
            CheckoutMode::Lifetime => "lifetime",
        }
    }
}

/// Lifecycle state of a checkout session.
///
/// Transitions only move forward: `pending` settles into exactly one of the
/// terminal states and never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Paid,
    Expired,
    Cancelled,
}

impl SessionStatus {
    /// Whether the session may still settle.
    pub fn is_pending(&self) -> bool {
        matches!(self, SessionStatus::Pending)
    }

    /// Whether moving to `next` respects the forward-only state machine.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        matches!(self, SessionStatus::Pending) && next != SessionStatus::Pending
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Paid => "paid",
            SessionStatus::Expired => "expired",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

/// A pending-to-settled record of one attempted payment for one
/// game/user/mode combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub id: CheckoutSessionId,
    pub user_id: UserId,
    pub game_id: GameId,
    pub mode: CheckoutMode,
    pub amount_cents: i64,
    pub status: SessionStatus,
    pub correlation_id: CorrelationId,
    pub payment_ref: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CheckoutSession {
    /// Creates a new pending session for an authenticated user and a game
    /// that already passed the availability gate.
    ///
    /// Derives the correlation ID and the charge amount (the lifetime price
    /// when buying lifetime access and one is set, the rental price
    /// otherwise).
    pub fn create(user_id: UserId, game: &Game, mode: CheckoutMode) -> Self {
        let id = CheckoutSessionId::new();
        let correlation_id = CorrelationId::for_session(&game.id, &user_id, &id);
        let now = Timestamp::now();

        Self {
            id,
            user_id,
            game_id: game.id,
            mode,
            amount_cents: game.charge_amount(mode),
            status: SessionStatus::Pending,
            correlation_id,
            payment_ref: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}
