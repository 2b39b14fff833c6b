//! PostgreSQL implementations of the account-facing side stores.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, GameId};
use crate::ports::{
    NotificationPreferences, NotificationPreferencesRepository, ReleaseNotifyRepository,
    SupportTicket, SupportTicketRepository,
};

/// PostgreSQL implementation of the SupportTicketRepository port.
pub struct PostgresSupportTicketRepository {
    pool: PgPool,
}

impl PostgresSupportTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupportTicketRepository for PostgresSupportTicketRepository {
    async fn insert(&self, ticket: &SupportTicket) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO support_tickets (id, user_id, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(ticket.id.as_uuid())
        .bind(ticket.user_id.map(|id| *id.as_uuid()))
        .bind(&ticket.subject)
        .bind(&ticket.message)
        .bind(ticket.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert support ticket: {}", e)))?;

        Ok(())
    }
}

/// PostgreSQL implementation of the ReleaseNotifyRepository port.
///
/// Notify lists are one row per game with a text[] of subscriber emails.
pub struct PostgresReleaseNotifyRepository {
    pool: PgPool,
}

impl PostgresReleaseNotifyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReleaseNotifyRepository for PostgresReleaseNotifyRepository {
    async fn subscribe(&self, game_id: &GameId, email: &str) -> Result<(), DomainError> {
        // array_position keeps re-subscriptions from growing the list.
        sqlx::query(
            r#"
            INSERT INTO release_notify (game_id, notify_list, updated_at)
            VALUES ($1, ARRAY[$2], NOW())
            ON CONFLICT (game_id) DO UPDATE
            SET notify_list = CASE
                    WHEN array_position(release_notify.notify_list, $2) IS NULL
                        THEN array_append(release_notify.notify_list, $2)
                    ELSE release_notify.notify_list
                END,
                updated_at = NOW()
            "#,
        )
        .bind(game_id.as_uuid())
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to subscribe to release: {}", e)))?;

        Ok(())
    }
}

/// PostgreSQL implementation of the NotificationPreferencesRepository port.
pub struct PostgresNotificationPreferencesRepository {
    pool: PgPool,
}

impl PostgresNotificationPreferencesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationPreferencesRepository for PostgresNotificationPreferencesRepository {
    async fn upsert(&self, preferences: &NotificationPreferences) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_notifications (user_id, email_release_alerts, email_expiry_alerts, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id) DO UPDATE
            SET email_release_alerts = EXCLUDED.email_release_alerts,
                email_expiry_alerts = EXCLUDED.email_expiry_alerts,
                updated_at = NOW()
            "#,
        )
        .bind(preferences.user_id.as_uuid())
        .bind(preferences.email_release_alerts)
        .bind(preferences.email_expiry_alerts)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to save notification preferences: {}", e))
        })?;

        Ok(())
    }
}
