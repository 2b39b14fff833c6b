//! Axum router configuration for account endpoints.

use axum::routing::post;
use axum::Router;

use super::super::app::AppState;
use super::handlers::{create_ticket, notify_upcoming, update_preferences};

/// Create the account API router, mounted under `/api`.
///
/// # Routes
/// - `POST /support/ticket` - Open a support ticket (auth optional)
/// - `POST /notify/upcoming` - Subscribe to release notifications (auth optional)
/// - `POST /account/preferences` - Replace notification preferences (auth required)
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/support/ticket", post(create_ticket))
        .route("/notify/upcoming", post(notify_upcoming))
        .route("/account/preferences", post(update_preferences))
}
