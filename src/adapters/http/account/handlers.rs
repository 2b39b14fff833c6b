//! HTTP handlers for account endpoints.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json};

use crate::application::handlers::account::{
    CreateTicketCommand, NotifyUpcomingCommand, UpdatePreferencesCommand,
};

use super::super::app::AppState;
use super::super::error::ApiError;
use super::dto::{
    CreateTicketRequest, CreateTicketResponse, NotifyUpcomingRequest, StatusResponse,
    UpdatePreferencesRequest,
};

/// POST /api/support/ticket - Open a support ticket. Anonymous callers are
/// accepted; an attached token links the ticket to its author.
///
/// Like every POST body here, parsed from raw bytes so a malformed payload
/// answers with the shared `invalid_json` code.
pub async fn create_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.authenticate_optional(&headers).await?;
    let request: CreateTicketRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_json())?;

    let handler = state.create_ticket_handler();
    let ticket_id = handler
        .handle(CreateTicketCommand {
            user,
            subject: request.subject,
            message: request.message,
        })
        .await?;

    Ok(Json(CreateTicketResponse {
        ticket_id: ticket_id.to_string(),
    }))
}

/// POST /api/notify/upcoming - Subscribe to a game's release notifications.
pub async fn notify_upcoming(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.authenticate_optional(&headers).await?;
    let request: NotifyUpcomingRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_json())?;

    let handler = state.notify_upcoming_handler();
    handler
        .handle(NotifyUpcomingCommand {
            user,
            game_id: request.game_id,
            email: request.email,
        })
        .await?;

    Ok(Json(StatusResponse {
        status: "subscribed",
    }))
}

/// POST /api/account/preferences - Replace the caller's notification
/// preferences. Requires authentication.
pub async fn update_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.authenticate(&headers).await?;
    let request: UpdatePreferencesRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_json())?;

    let handler = state.update_preferences_handler();
    handler
        .handle(UpdatePreferencesCommand {
            user,
            email_release_alerts: request.email_release_alerts,
            email_expiry_alerts: request.email_expiry_alerts,
        })
        .await?;

    Ok(Json(StatusResponse { status: "saved" }))
}
