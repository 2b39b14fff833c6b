//! Integration tests for checkout HTTP endpoints.
//!
//! These tests verify the HTTP layer wiring for checkout operations:
//! 1. Request DTOs deserialize correctly
//! 2. Response DTOs serialize correctly
//! 3. The application state wires handlers and the router builds
//! 4. The assembled router answers whole requests with the expected
//!    statuses and error bodies

use serde_json::json;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use ludoteca::adapters::auth::MockSessionValidator;
use ludoteca::adapters::http::checkout::dto::{CreateSessionRequest, CreateSessionResponse};
use ludoteca::adapters::http::{build_router, AppState};
use ludoteca::application::handlers::checkout::{CreateSessionCommand, GetSessionQuery};
use ludoteca::config::ServerConfig;
use ludoteca::domain::catalog::{Game, GameStatus};
use ludoteca::domain::checkout::{CheckoutError, CheckoutSession, CorrelationId, SessionStatus};
use ludoteca::domain::entitlement::{Purchase, Rental};
use ludoteca::domain::foundation::{
    AuthenticatedUser, CheckoutSessionId, DomainError, GameId, PurchaseId, RentalId, Timestamp,
    UserId,
};
use ludoteca::domain::webhook::SignatureVerifier;
use ludoteca::ports::{
    GameCatalog, NotificationPreferences, NotificationPreferencesRepository, PurchaseRepository,
    ReleaseNotifyRepository, RentalRepository, SessionRepository, SessionWithGame, SupportTicket,
    SupportTicketRepository,
};

use async_trait::async_trait;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Mock catalog holding a fixed set of games
struct MockCatalog {
    games: Vec<Game>,
}

#[async_trait]
impl GameCatalog for MockCatalog {
    async fn find_by_id(&self, game_id: &GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.games.iter().find(|g| g.id == *game_id).cloned())
    }
}

/// Mock session repository backed by a vector
#[derive(Default)]
struct MockSessions {
    sessions: Mutex<Vec<CheckoutSession>>,
}

#[async_trait]
impl SessionRepository for MockSessions {
    async fn insert(&self, session: &CheckoutSession) -> Result<(), DomainError> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_by_id_for_user(
        &self,
        session_id: &CheckoutSessionId,
        user_id: &UserId,
    ) -> Result<Option<CheckoutSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *session_id && s.user_id == *user_id)
            .cloned())
    }

    async fn find_by_correlation_id(
        &self,
        _correlation_id: &CorrelationId,
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

struct NoopRentals;

#[async_trait]
impl RentalRepository for NoopRentals {
    async fn find_active(
        &self,
        _user_id: &UserId,
        _game_id: &GameId,
    ) -> Result<Option<Rental>, DomainError> {
        Ok(None)
    }

    async fn insert(&self, _rental: &Rental) -> Result<(), DomainError> {
        Ok(())
    }

    async fn extend(
        &self,
        _rental_id: &RentalId,
        _new_expiry: Timestamp,
        _payment_ref: Option<&str>,
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

struct NoopPurchases;

#[async_trait]
impl PurchaseRepository for NoopPurchases {
    async fn find_by_user_and_game(
        &self,
        _user_id: &UserId,
        _game_id: &GameId,
    ) -> Result<Option<Purchase>, DomainError> {
        Ok(None)
    }

    async fn insert(&self, _purchase: &Purchase) -> Result<(), DomainError> {
        Ok(())
    }

    async fn update_payment_ref(
        &self,
        _purchase_id: &PurchaseId,
        _payment_ref: Option<&str>,
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

struct NoopTickets;

#[async_trait]
impl SupportTicketRepository for NoopTickets {
    async fn insert(&self, _ticket: &SupportTicket) -> Result<(), DomainError> {
        Ok(())
    }
}

struct NoopReleaseNotify;

#[async_trait]
impl ReleaseNotifyRepository for NoopReleaseNotify {
    async fn subscribe(&self, _game_id: &GameId, _email: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

struct NoopPreferences;

#[async_trait]
impl NotificationPreferencesRepository for NoopPreferences {
    async fn upsert(&self, _preferences: &NotificationPreferences) -> Result<(), DomainError> {
        Ok(())
    }
}

fn catalog_game() -> Game {
    Game {
        id: GameId::new(),
        title: "Midnight Regatta".to_string(),
        slug: "midnight-regatta".to_string(),
        price_cents: 1990,
        lifetime_price_cents: Some(7990),
        rental_duration_days: 14,
        is_lifetime_available: true,
        status: GameStatus::Available,
    }
}

fn test_state(games: Vec<Game>, validator: MockSessionValidator) -> AppState {
    AppState {
        catalog: Arc::new(MockCatalog { games }),
        sessions: Arc::new(MockSessions::default()),
        rentals: Arc::new(NoopRentals),
        purchases: Arc::new(NoopPurchases),
        tickets: Arc::new(NoopTickets),
        release_notify: Arc::new(NoopReleaseNotify),
        preferences: Arc::new(NoopPreferences),
        session_validator: Arc::new(validator),
        signature_verifier: Arc::new(SignatureVerifier::permissive()),
        payment_app_id: Some("app_test_123".to_string()),
        identity_configured: true,
    }
}

fn bearer_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_router_builds_from_state() {
    let state = test_state(vec![catalog_game()], MockSessionValidator::new());
    let _router = build_router(state, &ServerConfig::default());
    // If we get here, the route tree and layers are consistent
}

#[test]
fn test_create_session_request_deserializes() {
    let json_str = serde_json::to_string(&json!({
        "gameId": "0e6f16b4-7f1a-47c8-a9bb-6ea2bcb5b0d0",
        "mode": "lifetime"
    }))
    .unwrap();

    let req: CreateSessionRequest = serde_json::from_str(&json_str).unwrap();
    assert_eq!(
        req.game_id.as_deref(),
        Some("0e6f16b4-7f1a-47c8-a9bb-6ea2bcb5b0d0")
    );
    assert_eq!(req.mode.as_deref(), Some("lifetime"));
}

#[tokio::test]
async fn test_create_session_response_shape() {
    let game = catalog_game();
    let game_id = game.id;
    let state = test_state(vec![game], MockSessionValidator::new());

    let result = state
        .create_session_handler()
        .handle(CreateSessionCommand {
            user: AuthenticatedUser::new(UserId::new(), Some("player@example.com".to_string())),
            game_id: Some(game_id.to_string()),
            mode: None,
        })
        .await
        .unwrap();

    let response =
        CreateSessionResponse::from_result(&result, state.payment_app_id.clone());
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["sessionId"], result.session.id.to_string());
    assert_eq!(
        body["correlationId"],
        result.session.correlation_id.to_string()
    );
    assert_eq!(body["valueCents"], 1990);
    assert_eq!(body["mode"], "rental");
    assert_eq!(body["expiresIn"], 1800);
    assert_eq!(body["gameTitle"], "Midnight Regatta");
    assert_eq!(body["rentalDurationDays"], 14);
    assert_eq!(body["appId"], "app_test_123");
}

#[tokio::test]
async fn test_created_session_is_readable_by_its_owner_only() {
    let game = catalog_game();
    let game_id = game.id;
    let state = test_state(vec![game], MockSessionValidator::new());
    let owner = AuthenticatedUser::new(UserId::new(), None);

    let result = state
        .create_session_handler()
        .handle(CreateSessionCommand {
            user: owner.clone(),
            game_id: Some(game_id.to_string()),
            mode: Some("lifetime".to_string()),
        })
        .await
        .unwrap();

    let fetched = state
        .get_session_handler()
        .handle(GetSessionQuery {
            user: owner,
            session_id: result.session.id.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(fetched.status, SessionStatus::Pending);
    assert_eq!(fetched.amount_cents, 7990);

    // Another user asking for the same id sees nothing
    let err = state
        .get_session_handler()
        .handle(GetSessionQuery {
            user: AuthenticatedUser::new(UserId::new(), None),
            session_id: result.session.id.to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::SessionNotFound));
}

#[tokio::test]
async fn test_authenticate_resolves_bearer_token() {
    let (validator, user_id) = MockSessionValidator::new().with_token("tok_valid");
    let state = test_state(vec![], validator);

    let user = state.authenticate(&bearer_headers("tok_valid")).await.unwrap();
    assert_eq!(user.id, user_id);

    assert!(state.authenticate(&bearer_headers("tok_other")).await.is_err());
    assert!(state.authenticate(&HeaderMap::new()).await.is_err());
}

#[tokio::test]
async fn test_authenticate_optional_reads_bad_token_as_anonymous() {
    let (validator, user_id) = MockSessionValidator::new().with_token("tok_valid");
    let state = test_state(vec![], validator);

    let user = state
        .authenticate_optional(&bearer_headers("tok_valid"))
        .await
        .unwrap();
    assert_eq!(user.map(|u| u.id), Some(user_id));

    assert!(state
        .authenticate_optional(&bearer_headers("tok_bogus"))
        .await
        .unwrap()
        .is_none());
    assert!(state
        .authenticate_optional(&HeaderMap::new())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_authenticate_optional_still_fails_on_identity_outage() {
    let (validator, _) = MockSessionValidator::new().with_token("tok_valid");
    validator.set_unavailable(true);
    let state = test_state(vec![], validator);

    assert!(state
        .authenticate_optional(&bearer_headers("tok_valid"))
        .await
        .is_err());
}

// =============================================================================
// Router-level tests
// =============================================================================

#[tokio::test]
async fn test_healthz_answers_ok() {
    let router = build_router(
        test_state(vec![], MockSessionValidator::new()),
        &ServerConfig::default(),
    );

    let response = router
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_status_document_reports_configuration_presence() {
    let router = build_router(
        test_state(vec![], MockSessionValidator::new()),
        &ServerConfig::default(),
    );

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    // Permissive verifier in test_state, identity credentials present
    assert_eq!(body["secretConfigured"], false);
    assert_eq!(body["identityConfigured"], true);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_webhook_ping_answers_listening() {
    let router = build_router(
        test_state(vec![], MockSessionValidator::new()),
        &ServerConfig::default(),
    );

    let response = router
        .oneshot(
            Request::builder()
                .uri("/webhooks/openpix")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["status"], "listening");
}

#[tokio::test]
async fn test_checkout_without_token_is_unauthorized() {
    let router = build_router(
        test_state(vec![catalog_game()], MockSessionValidator::new()),
        &ServerConfig::default(),
    );

    let response = router
        .oneshot(post_json("/api/checkout/session", r#"{"gameId":"x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn test_malformed_checkout_body_is_invalid_json() {
    let (validator, _) = MockSessionValidator::new().with_token("tok_valid");
    let router = build_router(
        test_state(vec![catalog_game()], validator),
        &ServerConfig::default(),
    );

    let mut request = post_json("/api/checkout/session", "{not json");
    request.headers_mut().insert(
        axum::http::header::AUTHORIZATION,
        HeaderValue::from_static("Bearer tok_valid"),
    );
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "invalid_json");
}

#[tokio::test]
async fn test_malformed_ticket_body_is_invalid_json() {
    let router = build_router(
        test_state(vec![], MockSessionValidator::new()),
        &ServerConfig::default(),
    );

    let response = router
        .oneshot(post_json("/api/support/ticket", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "invalid_json");
}

#[tokio::test]
async fn test_malformed_preferences_body_is_invalid_json() {
    let (validator, _) = MockSessionValidator::new().with_token("tok_valid");
    let router = build_router(test_state(vec![], validator), &ServerConfig::default());

    let mut request = post_json("/api/account/preferences", "[oops");
    request.headers_mut().insert(
        axum::http::header::AUTHORIZATION,
        HeaderValue::from_static("Bearer tok_valid"),
    );
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "invalid_json");
}
