//! HTTP handlers for the payment webhook endpoint.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json};
use serde_json::json;

use crate::application::handlers::webhook::ReconcilePaymentCommand;

use super::super::app::AppState;
use super::super::error::ApiError;
use super::dto::WebhookAckResponse;

/// Header the provider sends its HMAC signature in.
const SIGNATURE_HEADER: &str = "x-openpix-signature";

/// POST /webhooks/openpix - Reconcile a payment provider delivery.
///
/// The body must stay raw: signature verification runs over the exact bytes
/// the provider signed.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.reconcile_payment_handler();
    let outcome = handler
        .handle(ReconcilePaymentCommand {
            raw_body: body.to_vec(),
            signature,
        })
        .await?;

    Ok(Json(WebhookAckResponse::from(outcome)))
}

/// GET /webhooks/openpix - Endpoint discovery ping used when registering the
/// webhook with the provider.
pub async fn webhook_ping() -> impl IntoResponse {
    Json(json!({
        "status": "listening",
        "message": "Envie um POST com o payload do webhook da OpenPix para processar pagamentos.",
    }))
}
