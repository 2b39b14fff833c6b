//! Read-only access to the game catalog.

use async_trait::async_trait;

use crate::domain::catalog::Game;
use crate::domain::foundation::{DomainError, GameId};

/// Catalog lookups needed by checkout.
#[async_trait]
pub trait GameCatalog: Send + Sync {
    /// Fetches a game by id. `Ok(None)` when the game does not exist.
    async fn find_by_id(&self, game_id: &GameId) -> Result<Option<Game>, DomainError>;
}
