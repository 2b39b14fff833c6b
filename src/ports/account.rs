//! Persistence for account-facing side features: support tickets, release
//! notification lists, and notification preferences.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GameId, TicketId, Timestamp, UserId};

/// A support request submitted through the storefront. The author may be
/// anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportTicket {
    pub id: TicketId,
    pub user_id: Option<UserId>,
    pub subject: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// A user's email notification toggles, upserted as a whole row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPreferences {
    pub user_id: UserId,
    pub email_release_alerts: bool,
    pub email_expiry_alerts: bool,
}

/// Persistence for support tickets.
#[async_trait]
pub trait SupportTicketRepository: Send + Sync {
    async fn insert(&self, ticket: &SupportTicket) -> Result<(), DomainError>;
}

/// Persistence for upcoming-release notification lists.
#[async_trait]
pub trait ReleaseNotifyRepository: Send + Sync {
    /// Adds an email to the game's notify list, creating the list on first
    /// subscription. Re-subscribing the same email is a no-op.
    async fn subscribe(&self, game_id: &GameId, email: &str) -> Result<(), DomainError>;
}

/// Persistence for notification preference rows.
#[async_trait]
pub trait NotificationPreferencesRepository: Send + Sync {
    /// Inserts or replaces the user's preference row.
    async fn upsert(&self, preferences: &NotificationPreferences) -> Result<(), DomainError>;
}
