//! HTTP DTOs for the payment webhook endpoint.

use serde::Serialize;

use crate::domain::webhook::ReconcileOutcome;

/// Acknowledgement body for a reconciled delivery. Always sent with 200.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAckResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl From<ReconcileOutcome> for WebhookAckResponse {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::Processed {
                correlation_id,
                customer_email,
            } => Self {
                status: "processed",
                correlation_id: Some(correlation_id),
                email: customer_email,
                reason: None,
            },
            ReconcileOutcome::AlreadyProcessed => Self {
                status: "already_processed",
                correlation_id: None,
                email: None,
                reason: None,
            },
            ReconcileOutcome::Ignored(reason) => Self {
                status: "ignored",
                correlation_id: None,
                email: None,
                reason: Some(reason.as_str()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::webhook::IgnoreReason;
    use serde_json::json;

    #[test]
    fn processed_ack_carries_correlation_and_email() {
        let ack = WebhookAckResponse::from(ReconcileOutcome::Processed {
            correlation_id: "game_a__user_b__session_c".to_string(),
            customer_email: Some("buyer@example.com".to_string()),
        });
        assert_eq!(
            serde_json::to_value(&ack).unwrap(),
            json!({
                "status": "processed",
                "correlationId": "game_a__user_b__session_c",
                "email": "buyer@example.com",
            })
        );
    }

    #[test]
    fn ignored_ack_names_the_reason() {
        let ack = WebhookAckResponse::from(ReconcileOutcome::Ignored(IgnoreReason::EventType));
        assert_eq!(
            serde_json::to_value(&ack).unwrap(),
            json!({ "status": "ignored", "reason": "event_type" })
        );
    }

    #[test]
    fn already_processed_ack_is_bare() {
        let ack = WebhookAckResponse::from(ReconcileOutcome::AlreadyProcessed);
        assert_eq!(
            serde_json::to_value(&ack).unwrap(),
            json!({ "status": "already_processed" })
        );
    }
}
