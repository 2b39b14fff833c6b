//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::GameEntitlementSnapshot;
use crate::domain::checkout::{CheckoutMode, CheckoutSession, CorrelationId, SessionStatus};
use crate::domain::foundation::{CheckoutSessionId, DomainError, GameId, Timestamp, UserId};
use crate::ports::{SessionRepository, SessionWithGame};

/// PostgreSQL implementation of the SessionRepository port.
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a checkout session.
#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    game_id: Uuid,
    mode: String,
    amount_cents: i64,
    status: String,
    correlation_id: String,
    payment_ref: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Session joined with the game columns reconciliation needs.
#[derive(Debug, sqlx::FromRow)]
struct SessionWithGameRow {
    #[sqlx(flatten)]
    session: SessionRow,
    rental_duration_days: Option<i32>,
    game_is_lifetime_available: Option<bool>,
}

impl TryFrom<SessionRow> for CheckoutSession {
    type Error = DomainError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(CheckoutSession {
            id: CheckoutSessionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            game_id: GameId::from_uuid(row.game_id),
            mode: parse_mode(&row.mode)?,
            amount_cents: row.amount_cents,
            status: parse_status(&row.status)?,
            correlation_id: CorrelationId::from_raw(row.correlation_id),
            payment_ref: row.payment_ref,
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) fn parse_mode(s: &str) -> Result<CheckoutMode, DomainError> {
    match s {
        "rental" => Ok(CheckoutMode::Rental),
        "lifetime" => Ok(CheckoutMode::Lifetime),
        _ => Err(DomainError::database(format!("Invalid mode value: {}", s))),
    }
}

fn parse_status(s: &str) -> Result<SessionStatus, DomainError> {
    match s {
        "pending" => Ok(SessionStatus::Pending),
        "paid" => Ok(SessionStatus::Paid),
        "expired" => Ok(SessionStatus::Expired),
        "cancelled" => Ok(SessionStatus::Cancelled),
        _ => Err(DomainError::database(format!(
            "Invalid session status value: {}",
            s
        ))),
    }
}

const SESSION_COLUMNS: &str = "id, user_id, game_id, mode, amount_cents, status, \
     correlation_id, payment_ref, expires_at, created_at, updated_at";

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, session: &CheckoutSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO checkout_sessions (
                id, user_id, game_id, mode, amount_cents, status,
                correlation_id, payment_ref, expires_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.game_id.as_uuid())
        .bind(session.mode.as_str())
        .bind(session.amount_cents)
        .bind(session.status.as_str())
        .bind(session.correlation_id.as_str())
        .bind(&session.payment_ref)
        .bind(session.expires_at.map(|t| *t.as_datetime()))
        .bind(session.created_at.as_datetime())
        .bind(session.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert session: {}", e)))?;

        Ok(())
    }

    async fn find_by_id_for_user(
        &self,
        session_id: &CheckoutSessionId,
        user_id: &UserId,
    ) -> Result<Option<CheckoutSession>, DomainError> {
        let row: Option<SessionRow> = sqlx::query_as(&format!(
            "SELECT {SESSION_COLUMNS} FROM checkout_sessions WHERE id = $1 AND user_id = $2",
        ))
        .bind(session_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find session: {}", e)))?;

        row.map(CheckoutSession::try_from).transpose()
    }

    async fn find_by_correlation_id(
        &self,
        correlation_id: &CorrelationId,
    ) -> Result<Option<SessionWithGame>, DomainError> {
        let row: Option<SessionWithGameRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.user_id, s.game_id, s.mode, s.amount_cents, s.status,
                   s.correlation_id, s.payment_ref, s.expires_at, s.created_at, s.updated_at,
                   g.rental_duration_days,
                   g.is_lifetime_available AS game_is_lifetime_available
            FROM checkout_sessions s
            LEFT JOIN games g ON g.id = s.game_id
            WHERE s.correlation_id = $1
            "#,
        )
        .bind(correlation_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to find session by correlation: {}", e))
        })?;

        row.map(|r| {
            Ok(SessionWithGame {
                game: GameEntitlementSnapshot {
                    rental_duration_days: r.rental_duration_days,
                    is_lifetime_available: r.game_is_lifetime_available.unwrap_or(false),
                },
                session: CheckoutSession::try_from(r.session)?,
            })
        })
        .transpose()
    }

    async fn mark_paid(
        &self,
        session_id: &CheckoutSessionId,
        payment_ref: Option<&str>,
    ) -> Result<bool, DomainError> {
        // The WHERE status = 'pending' guard is the idempotency gate:
        // concurrent deliveries of the same event race here and exactly one
        // sees rows_affected = 1.
        let result = sqlx::query(
            r#"
            UPDATE checkout_sessions
            SET status = 'paid', payment_ref = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(payment_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to mark session paid: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
