//! Axum router configuration for webhook endpoints.

use axum::routing::get;
use axum::Router;

use super::super::app::AppState;
use super::handlers::{receive_webhook, webhook_ping};

/// Create the webhook router.
///
/// Separate from the user-facing API because deliveries carry no user
/// authentication; they are verified via signature instead.
///
/// # Routes
/// - `POST /openpix` - Reconcile a payment delivery
/// - `GET /openpix` - Registration ping
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/openpix", get(webhook_ping).post(receive_webhook))
}
