//! CreateSessionHandler - Command handler for starting a checkout session.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::catalog::Game;
use crate::domain::checkout::{CheckoutError, CheckoutMode, CheckoutSession};
use crate::domain::foundation::{AuthenticatedUser, GameId};
use crate::ports::{GameCatalog, SessionRepository};

/// Command to create a checkout session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub user: AuthenticatedUser,
    /// Raw game id from the request body; absent or unparseable values fail
    /// the same way the game not existing does.
    pub game_id: Option<String>,
    /// Raw mode from the request body; anything but `lifetime` is a rental.
    pub mode: Option<String>,
}

/// Result of creating a session: the pending session plus the game it is
/// for, which the response echoes back to the client.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: CheckoutSession,
    pub game: Game,
}

/// Handler for creating checkout sessions.
pub struct CreateSessionHandler {
    catalog: Arc<dyn GameCatalog>,
    sessions: Arc<dyn SessionRepository>,
}

impl CreateSessionHandler {
    pub fn new(catalog: Arc<dyn GameCatalog>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { catalog, sessions }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResult, CheckoutError> {
        // 1. A game id is mandatory
        let raw_game_id = match cmd.game_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(CheckoutError::MissingGameId),
        };

        // 2. Resolve the game; an unparseable id cannot match a catalog row
        let game_id = GameId::from_str(raw_game_id).map_err(|_| CheckoutError::GameNotFound)?;
        let game = self
            .catalog
            .find_by_id(&game_id)
            .await?
            .ok_or(CheckoutError::GameNotFound)?;

        // 3. Gate on availability for the requested mode
        let mode = CheckoutMode::from_request(cmd.mode.as_deref());
        game.ensure_mode_allowed(mode)?;

        // 4. Create and persist the pending session
        let session = CheckoutSession::create(cmd.user.id, &game, mode);
        self.sessions.insert(&session).await?;

        Ok(CreateSessionResult { session, game })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::catalog::{Game, GameStatus};
    use crate::domain::checkout::SessionStatus;
    use crate::domain::foundation::{CheckoutSessionId, DomainError, UserId};
    use crate::ports::SessionWithGame;

    // ══════════════════════════════════════════════════════════════
    // Mocks
    // ══════════════════════════════════════════════════════════════

    struct MockCatalog {
        game: Option<Game>,
    }

    #[async_trait]
    impl GameCatalog for MockCatalog {
        async fn find_by_id(&self, game_id: &GameId) -> Result<Option<Game>, DomainError> {
            Ok(self.game.clone().filter(|g| g.id == *game_id))
        }
    }

    #[derive(Default)]
    struct MockSessions {
        inserted: Mutex<Vec<CheckoutSession>>,
    }

    #[async_trait]
    impl SessionRepository for MockSessions {
        async fn insert(&self, session: &CheckoutSession) -> Result<(), DomainError> {
            self.inserted.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn find_by_id_for_user(
            &self,
            _session_id: &CheckoutSessionId,
            _user_id: &UserId,
        ) -> Result<Option<CheckoutSession>, DomainError> {
            Ok(None)
        }

        async fn find_by_correlation_id(
            &self,
            _correlation_id: &crate::domain::checkout::CorrelationId,
        ) -> Result<Option<SessionWithGame>, DomainError> {
            Ok(None)
        }

        async fn mark_paid(
            &self,
            _session_id: &CheckoutSessionId,
            _payment_ref: Option<&str>,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    fn available_game() -> Game {
        Game {
            id: GameId::new(),
            title: "Tidal Gambit".to_string(),
            slug: "tidal-gambit".to_string(),
            price_cents: 1490,
            lifetime_price_cents: Some(5990),
            rental_duration_days: 30,
            is_lifetime_available: true,
            status: GameStatus::Available,
        }
    }

    fn handler(game: Option<Game>) -> (CreateSessionHandler, Arc<MockSessions>) {
        let sessions = Arc::new(MockSessions::default());
        let handler = CreateSessionHandler::new(
            Arc::new(MockCatalog { game }),
            sessions.clone(),
        );
        (handler, sessions)
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(),
            email: Some("player@example.com".to_string()),
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Validation
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_game_id_is_rejected() {
        let (handler, _) = handler(Some(available_game()));
        let err = handler
            .handle(CreateSessionCommand {
                user: user(),
                game_id: None,
                mode: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingGameId));
    }

    #[tokio::test]
    async fn blank_game_id_is_rejected() {
        let (handler, _) = handler(Some(available_game()));
        let err = handler
            .handle(CreateSessionCommand {
                user: user(),
                game_id: Some("   ".to_string()),
                mode: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingGameId));
    }

    #[tokio::test]
    async fn unparseable_game_id_reads_as_not_found() {
        let (handler, _) = handler(Some(available_game()));
        let err = handler
            .handle(CreateSessionCommand {
                user: user(),
                game_id: Some("not-a-uuid".to_string()),
                mode: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::GameNotFound));
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let (handler, _) = handler(None);
        let err = handler
            .handle(CreateSessionCommand {
                user: user(),
                game_id: Some(GameId::new().to_string()),
                mode: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::GameNotFound));
    }

    #[tokio::test]
    async fn lifetime_mode_on_rental_only_game_conflicts() {
        let mut game = available_game();
        game.is_lifetime_available = false;
        let id = game.id;
        let (handler, _) = handler(Some(game));

        let err = handler
            .handle(CreateSessionCommand {
                user: user(),
                game_id: Some(id.to_string()),
                mode: Some("lifetime".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::LifetimeNotAvailable));
    }

    // ══════════════════════════════════════════════════════════════
    // Creation
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn creates_pending_rental_session() {
        let game = available_game();
        let id = game.id;
        let (handler, sessions) = handler(Some(game));
        let user = user();

        let result = handler
            .handle(CreateSessionCommand {
                user: user.clone(),
                game_id: Some(id.to_string()),
                mode: None,
            })
            .await
            .unwrap();

        let session = result.session;
        assert_eq!(result.game.id, id);
        assert_eq!(session.status, SessionStatus::Pending);
        assert_eq!(session.mode, CheckoutMode::Rental);
        assert_eq!(session.amount_cents, 1490);
        assert_eq!(session.user_id, user.id);
        assert_eq!(sessions.inserted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn lifetime_session_charges_lifetime_price() {
        let game = available_game();
        let id = game.id;
        let (handler, _) = handler(Some(game));

        let result = handler
            .handle(CreateSessionCommand {
                user: user(),
                game_id: Some(id.to_string()),
                mode: Some("lifetime".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.session.mode, CheckoutMode::Lifetime);
        assert_eq!(result.session.amount_cents, 5990);
    }
}
