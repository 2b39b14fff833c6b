//! HTTP handlers for checkout endpoints.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json};

use crate::application::handlers::checkout::{CreateSessionCommand, GetSessionQuery};

use super::super::app::AppState;
use super::super::error::ApiError;
use super::dto::{CreateSessionRequest, CreateSessionResponse, SessionResponse};

/// POST /api/checkout/session - Start a checkout session.
///
/// The body is taken as raw JSON so a malformed payload answers with the
/// same `invalid_json` code as the webhook endpoint.
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.authenticate(&headers).await?;
    let request: CreateSessionRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::invalid_json())?;

    let handler = state.create_session_handler();
    let result = handler
        .handle(CreateSessionCommand {
            user,
            game_id: request.game_id,
            mode: request.mode,
        })
        .await?;

    let response = CreateSessionResponse::from_result(&result, state.payment_app_id.clone());
    Ok(Json(response))
}

/// GET /api/checkout/session/:id - Read one of the caller's sessions.
pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.authenticate(&headers).await?;

    let handler = state.get_session_handler();
    let session = handler.handle(GetSessionQuery { user, session_id }).await?;

    Ok(Json(SessionResponse::from(&session)))
}
