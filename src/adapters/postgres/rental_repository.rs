//! PostgreSQL implementation of RentalRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entitlement::{Rental, RentalStatus};
use crate::domain::foundation::{DomainError, GameId, RentalId, Timestamp, UserId};
use crate::ports::RentalRepository;

use super::session_repository::parse_mode;

/// PostgreSQL implementation of the RentalRepository port.
pub struct PostgresRentalRepository {
    pool: PgPool,
}

impl PostgresRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a rental.
#[derive(Debug, sqlx::FromRow)]
struct RentalRow {
    id: Uuid,
    user_id: Uuid,
    game_id: Uuid,
    mode: String,
    starts_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    status: String,
    payment_ref: Option<String>,
}

impl TryFrom<RentalRow> for Rental {
    type Error = DomainError;

    fn try_from(row: RentalRow) -> Result<Self, Self::Error> {
        Ok(Rental {
            id: RentalId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            game_id: GameId::from_uuid(row.game_id),
            mode: parse_mode(&row.mode)?,
            starts_at: Timestamp::from_datetime(row.starts_at),
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            status: parse_rental_status(&row.status)?,
            payment_ref: row.payment_ref,
        })
    }
}

fn parse_rental_status(s: &str) -> Result<RentalStatus, DomainError> {
    match s {
        "active" => Ok(RentalStatus::Active),
        "expired" => Ok(RentalStatus::Expired),
        "refunded" => Ok(RentalStatus::Refunded),
        _ => Err(DomainError::database(format!(
            "Invalid rental status value: {}",
            s
        ))),
    }
}

#[async_trait]
impl RentalRepository for PostgresRentalRepository {
    async fn find_active(
        &self,
        user_id: &UserId,
        game_id: &GameId,
    ) -> Result<Option<Rental>, DomainError> {
        let row: Option<RentalRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, game_id, mode, starts_at, expires_at, status, payment_ref
            FROM rentals
            WHERE user_id = $1 AND game_id = $2 AND status = 'active'
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(game_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find active rental: {}", e)))?;

        row.map(Rental::try_from).transpose()
    }

    async fn insert(&self, rental: &Rental) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO rentals (id, user_id, game_id, mode, starts_at, expires_at, status, payment_ref)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(rental.id.as_uuid())
        .bind(rental.user_id.as_uuid())
        .bind(rental.game_id.as_uuid())
        .bind(rental.mode.as_str())
        .bind(rental.starts_at.as_datetime())
        .bind(rental.expires_at.map(|t| *t.as_datetime()))
        .bind(rental.status.as_str())
        .bind(&rental.payment_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert rental: {}", e)))?;

        Ok(())
    }

    async fn extend(
        &self,
        rental_id: &RentalId,
        new_expiry: Timestamp,
        payment_ref: Option<&str>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET expires_at = $2, payment_ref = $3, status = 'active', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(rental_id.as_uuid())
        .bind(new_expiry.as_datetime())
        .bind(payment_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to extend rental: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::database(format!(
                "Rental not found for extension: {}",
                rental_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_persisted_status() {
        for (raw, expected) in [
            ("active", RentalStatus::Active),
            ("expired", RentalStatus::Expired),
            ("refunded", RentalStatus::Refunded),
        ] {
            assert_eq!(parse_rental_status(raw).unwrap(), expected);
        }
        assert!(parse_rental_status("paused").is_err());
    }
}
