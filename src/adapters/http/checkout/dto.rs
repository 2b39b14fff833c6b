//! HTTP DTOs for checkout endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::checkout::CreateSessionResult;
use crate::domain::checkout::{CheckoutSession, DEFAULT_EXPIRES_IN_SECS};

/// Request to start a checkout session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// The game to rent or buy.
    #[serde(default)]
    pub game_id: Option<String>,
    /// `"lifetime"` for a purchase; anything else is a rental.
    #[serde(default)]
    pub mode: Option<String>,
}

/// Response returned when a session is created. Carries everything the
/// frontend needs to open the provider's payment widget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub correlation_id: String,
    pub value_cents: i64,
    pub mode: String,
    pub expires_in: u64,
    pub game_title: String,
    pub rental_duration_days: i32,
    pub app_id: Option<String>,
}

impl CreateSessionResponse {
    pub fn from_result(result: &CreateSessionResult, app_id: Option<String>) -> Self {
        Self {
            session_id: result.session.id.to_string(),
            correlation_id: result.session.correlation_id.to_string(),
            value_cents: result.session.amount_cents,
            mode: result.session.mode.as_str().to_string(),
            expires_in: DEFAULT_EXPIRES_IN_SECS,
            game_title: result.game.title.clone(),
            rental_duration_days: result.game.rental_duration_days,
            app_id,
        }
    }
}

/// Response for reading one session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub game_id: String,
    pub mode: String,
    pub status: String,
    pub value_cents: i64,
    pub correlation_id: String,
    pub payment_ref: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&CheckoutSession> for SessionResponse {
    fn from(session: &CheckoutSession) -> Self {
        Self {
            session_id: session.id.to_string(),
            game_id: session.game_id.to_string(),
            mode: session.mode.as_str().to_string(),
            status: session.status.as_str().to_string(),
            value_cents: session.amount_cents,
            correlation_id: session.correlation_id.to_string(),
            payment_ref: session.payment_ref.clone(),
            created_at: session.created_at.to_string(),
            updated_at: session.updated_at.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_accepts_camel_case_fields() {
        let req: CreateSessionRequest = serde_json::from_value(json!({
            "gameId": "2fd2e0aa-95dc-4db5-9fc4-5f09f6a23b12",
            "mode": "lifetime",
        }))
        .unwrap();
        assert_eq!(req.game_id.as_deref(), Some("2fd2e0aa-95dc-4db5-9fc4-5f09f6a23b12"));
        assert_eq!(req.mode.as_deref(), Some("lifetime"));
    }

    #[test]
    fn request_fields_are_optional() {
        let req: CreateSessionRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.game_id.is_none());
        assert!(req.mode.is_none());
    }
}
