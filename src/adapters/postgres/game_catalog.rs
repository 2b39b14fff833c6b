//! PostgreSQL implementation of GameCatalog.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Game, GameStatus};
use crate::domain::foundation::{DomainError, GameId};
use crate::ports::GameCatalog;

/// PostgreSQL implementation of the GameCatalog port.
pub struct PostgresGameCatalog {
    pool: PgPool,
}

impl PostgresGameCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a game.
#[derive(Debug, sqlx::FromRow)]
struct GameRow {
    id: Uuid,
    title: String,
    slug: String,
    price_cents: i64,
    lifetime_price_cents: Option<i64>,
    rental_duration_days: i32,
    is_lifetime_available: bool,
    status: String,
}

impl TryFrom<GameRow> for Game {
    type Error = DomainError;

    fn try_from(row: GameRow) -> Result<Self, Self::Error> {
        Ok(Game {
            id: GameId::from_uuid(row.id),
            title: row.title,
            slug: row.slug,
            price_cents: row.price_cents,
            lifetime_price_cents: row.lifetime_price_cents,
            rental_duration_days: row.rental_duration_days,
            is_lifetime_available: row.is_lifetime_available,
            status: parse_game_status(&row.status)?,
        })
    }
}

pub(super) fn parse_game_status(s: &str) -> Result<GameStatus, DomainError> {
    match s {
        "available" => Ok(GameStatus::Available),
        "coming_soon" => Ok(GameStatus::ComingSoon),
        _ => Err(DomainError::database(format!(
            "Invalid game status value: {}",
            s
        ))),
    }
}

#[async_trait]
impl GameCatalog for PostgresGameCatalog {
    async fn find_by_id(&self, game_id: &GameId) -> Result<Option<Game>, DomainError> {
        let row: Option<GameRow> = sqlx::query_as(
            r#"
            SELECT id, title, slug, price_cents, lifetime_price_cents,
                   rental_duration_days, is_lifetime_available, status
            FROM games
            WHERE id = $1
            "#,
        )
        .bind(game_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find game: {}", e)))?;

        row.map(Game::try_from).transpose()
    }
}
