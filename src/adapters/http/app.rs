//! Application state and router assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::handlers::account::{
    CreateTicketHandler, NotifyUpcomingHandler, UpdatePreferencesHandler,
};
use crate::application::handlers::checkout::{CreateSessionHandler, GetSessionHandler};
use crate::application::handlers::webhook::ReconcilePaymentHandler;
use crate::config::ServerConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::domain::webhook::SignatureVerifier;
use crate::ports::{
    GameCatalog, NotificationPreferencesRepository, PurchaseRepository, ReleaseNotifyRepository,
    RentalRepository, SessionRepository, SessionValidator, SupportTicketRepository,
};

use super::{account, checkout, webhook};

/// Shared application state containing all dependencies.
///
/// Cloned per request; everything inside is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn GameCatalog>,
    pub sessions: Arc<dyn SessionRepository>,
    pub rentals: Arc<dyn RentalRepository>,
    pub purchases: Arc<dyn PurchaseRepository>,
    pub tickets: Arc<dyn SupportTicketRepository>,
    pub release_notify: Arc<dyn ReleaseNotifyRepository>,
    pub preferences: Arc<dyn NotificationPreferencesRepository>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub signature_verifier: Arc<SignatureVerifier>,
    /// Provider application id echoed to the client so it can open the
    /// payment widget.
    pub payment_app_id: Option<String>,
    /// Whether identity credentials were present at startup. Reported in the
    /// status document next to the webhook secret flag.
    pub identity_configured: bool,
}

impl AppState {
    // Create handlers on demand from the shared state.

    pub fn create_session_handler(&self) -> CreateSessionHandler {
        CreateSessionHandler::new(self.catalog.clone(), self.sessions.clone())
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.sessions.clone())
    }

    pub fn reconcile_payment_handler(&self) -> ReconcilePaymentHandler {
        ReconcilePaymentHandler::new(
            self.signature_verifier.clone(),
            self.sessions.clone(),
            self.rentals.clone(),
            self.purchases.clone(),
        )
    }

    pub fn create_ticket_handler(&self) -> CreateTicketHandler {
        CreateTicketHandler::new(self.tickets.clone())
    }

    pub fn notify_upcoming_handler(&self) -> NotifyUpcomingHandler {
        NotifyUpcomingHandler::new(self.release_notify.clone())
    }

    pub fn update_preferences_handler(&self) -> UpdatePreferencesHandler {
        UpdatePreferencesHandler::new(self.preferences.clone())
    }

    /// Resolves the Authorization header to an authenticated user.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthenticatedUser, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::InvalidToken)?;
        self.session_validator.validate(token).await
    }

    /// Like [`authenticate`](Self::authenticate) for endpoints that accept
    /// anonymous callers. A bad or missing token reads as anonymous; an
    /// unreachable identity service still fails the request.
    pub async fn authenticate_optional(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<AuthenticatedUser>, AuthError> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };
        match self.session_validator.validate(token).await {
            Ok(user) => Ok(Some(user)),
            Err(AuthError::InvalidToken) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Extracts the token from a `Bearer <token>` Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Assemble the complete application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = cors_layer(config);

    Router::new()
        .route("/", get(health_root))
        .route("/healthz", get(healthz))
        .nest("/api/checkout", checkout::checkout_routes())
        .nest("/api", account::account_routes())
        .nest("/webhooks", webhook::webhook_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .with_state(state)
}

/// CORS for the storefront frontend. Without configured origins any origin
/// is allowed, which matches how lower environments run.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-openpix-signature"),
        ]);

    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// GET / - Service status summary.
async fn health_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "secretConfigured": state.signature_verifier.is_enforcing(),
        "identityConfigured": state.identity_configured,
        "timestamp": crate::domain::foundation::Timestamp::now().to_string(),
    }))
}

/// GET /healthz - Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}
