//! NotifyUpcomingHandler - Command handler for release notification
//! subscriptions.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, GameId};
use crate::ports::ReleaseNotifyRepository;

use super::AccountError;

/// Command to subscribe an email to a game's release notification list.
///
/// The email may come from the body or from the authenticated user; the body
/// wins when both are present.
#[derive(Debug, Clone)]
pub struct NotifyUpcomingCommand {
    pub user: Option<AuthenticatedUser>,
    pub game_id: Option<String>,
    pub email: Option<String>,
}

/// Handler for release notification subscriptions.
pub struct NotifyUpcomingHandler {
    notify: Arc<dyn ReleaseNotifyRepository>,
}

impl NotifyUpcomingHandler {
    pub fn new(notify: Arc<dyn ReleaseNotifyRepository>) -> Self {
        Self { notify }
    }

    pub async fn handle(&self, cmd: NotifyUpcomingCommand) -> Result<(), AccountError> {
        let game_id = cmd
            .game_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| GameId::from_str(id).ok())
            .ok_or(AccountError::MissingGameId)?;

        let email = cmd
            .email
            .filter(|e| !e.trim().is_empty())
            .or(cmd.user.and_then(|u| u.email))
            .ok_or(AccountError::EmailRequired)?;

        // Stored lowercase so the list dedups across capitalizations
        self.notify
            .subscribe(&game_id, &email.trim().to_lowercase())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::foundation::{DomainError, UserId};

    #[derive(Default)]
    struct MockNotify {
        subscriptions: Mutex<Vec<(GameId, String)>>,
    }

    #[async_trait]
    impl ReleaseNotifyRepository for MockNotify {
        async fn subscribe(&self, game_id: &GameId, email: &str) -> Result<(), DomainError> {
            self.subscriptions
                .lock()
                .unwrap()
                .push((*game_id, email.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn body_email_is_lowercased_and_subscribed() {
        let notify = Arc::new(MockNotify::default());
        let handler = NotifyUpcomingHandler::new(notify.clone());
        let game = GameId::new();

        handler
            .handle(NotifyUpcomingCommand {
                user: None,
                game_id: Some(game.to_string()),
                email: Some("Fan@Example.COM".to_string()),
            })
            .await
            .unwrap();

        let subs = notify.subscriptions.lock().unwrap();
        assert_eq!(subs[0], (game, "fan@example.com".to_string()));
    }

    #[tokio::test]
    async fn falls_back_to_authenticated_users_email() {
        let notify = Arc::new(MockNotify::default());
        let handler = NotifyUpcomingHandler::new(notify.clone());

        handler
            .handle(NotifyUpcomingCommand {
                user: Some(AuthenticatedUser {
                    id: UserId::new(),
                    email: Some("me@example.com".to_string()),
                }),
                game_id: Some(GameId::new().to_string()),
                email: None,
            })
            .await
            .unwrap();

        assert_eq!(
            notify.subscriptions.lock().unwrap()[0].1,
            "me@example.com"
        );
    }

    #[tokio::test]
    async fn missing_game_id_is_rejected() {
        let handler = NotifyUpcomingHandler::new(Arc::new(MockNotify::default()));
        let err = handler
            .handle(NotifyUpcomingCommand {
                user: None,
                game_id: None,
                email: Some("x@example.com".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::MissingGameId));
    }

    #[tokio::test]
    async fn no_email_anywhere_is_rejected() {
        let handler = NotifyUpcomingHandler::new(Arc::new(MockNotify::default()));
        let err = handler
            .handle(NotifyUpcomingCommand {
                user: Some(AuthenticatedUser {
                    id: UserId::new(),
                    email: None,
                }),
                game_id: Some(GameId::new().to_string()),
                email: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailRequired));
    }
}
