//! HTTP DTOs for account endpoints.

use serde::{Deserialize, Serialize};

/// Request to open a support ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicketRequest {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response after opening a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketResponse {
    pub ticket_id: String,
}

/// Request to subscribe to release notifications for a game.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyUpcomingRequest {
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request to replace notification preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    #[serde(default)]
    pub email_release_alerts: bool,
    #[serde(default)]
    pub email_expiry_alerts: bool,
}

/// Bare status acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
