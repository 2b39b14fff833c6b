//! Axum router configuration for checkout endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::app::AppState;
use super::handlers::{create_session, get_session};

/// Create the checkout API router.
///
/// # Routes
/// - `POST /session` - Start a checkout session (requires authentication)
/// - `GET /session/:id` - Read one of the caller's sessions
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(create_session))
        .route("/session/:id", get(get_session))
}
