//! PostgreSQL implementation of PurchaseRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entitlement::Purchase;
use crate::domain::foundation::{DomainError, GameId, PurchaseId, Timestamp, UserId};
use crate::ports::PurchaseRepository;

/// PostgreSQL implementation of the PurchaseRepository port.
pub struct PostgresPurchaseRepository {
    pool: PgPool,
}

impl PostgresPurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a purchase.
#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: Uuid,
    user_id: Uuid,
    game_id: Uuid,
    purchased_at: DateTime<Utc>,
    payment_ref: Option<String>,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Purchase {
            id: PurchaseId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            game_id: GameId::from_uuid(row.game_id),
            purchased_at: Timestamp::from_datetime(row.purchased_at),
            payment_ref: row.payment_ref,
        }
    }
}

#[async_trait]
impl PurchaseRepository for PostgresPurchaseRepository {
    async fn find_by_user_and_game(
        &self,
        user_id: &UserId,
        game_id: &GameId,
    ) -> Result<Option<Purchase>, DomainError> {
        let row: Option<PurchaseRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, game_id, purchased_at, payment_ref
            FROM purchases
            WHERE user_id = $1 AND game_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(game_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find purchase: {}", e)))?;

        Ok(row.map(Purchase::from))
    }

    async fn insert(&self, purchase: &Purchase) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO purchases (id, user_id, game_id, purchased_at, payment_ref)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(purchase.id.as_uuid())
        .bind(purchase.user_id.as_uuid())
        .bind(purchase.game_id.as_uuid())
        .bind(purchase.purchased_at.as_datetime())
        .bind(&purchase.payment_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert purchase: {}", e)))?;

        Ok(())
    }

    async fn update_payment_ref(
        &self,
        purchase_id: &PurchaseId,
        payment_ref: Option<&str>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE purchases
            SET payment_ref = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(purchase_id.as_uuid())
        .bind(payment_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to update purchase reference: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::database(format!(
                "Purchase not found for update: {}",
                purchase_id
            )));
        }

        Ok(())
    }
}
