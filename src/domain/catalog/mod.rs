//! Game catalog read-model consumed by checkout and reconciliation.

mod game;

pub use game::{Game, GameEntitlementSnapshot, GameStatus};
