//! ReconcilePaymentHandler - Command handler for settling checkout sessions
//! from payment provider webhook deliveries.

use std::sync::Arc;

use crate::domain::checkout::{CheckoutMode, CorrelationId};
use crate::domain::entitlement::{Purchase, Rental};
use crate::domain::foundation::Timestamp;
use crate::domain::webhook::{
    payload, IgnoreReason, ReconcileOutcome, SignatureVerifier, WebhookError,
};
use crate::ports::{PurchaseRepository, RentalRepository, SessionRepository, SessionWithGame};

/// Command to reconcile one webhook delivery.
#[derive(Debug, Clone)]
pub struct ReconcilePaymentCommand {
    /// Raw request body, exactly as received. Signature verification runs
    /// over these bytes.
    pub raw_body: Vec<u8>,
    /// Value of the provider signature header, if present.
    pub signature: Option<String>,
}

/// Handler for reconciling payment webhooks.
///
/// Deliveries are at-least-once and unordered; the pending-to-paid
/// compare-and-set on the session row makes the whole pipeline idempotent.
/// Structural problems with a delivery acknowledge as ignored so the
/// provider stops retrying something that can never succeed.
pub struct ReconcilePaymentHandler {
    verifier: Arc<SignatureVerifier>,
    sessions: Arc<dyn SessionRepository>,
    rentals: Arc<dyn RentalRepository>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl ReconcilePaymentHandler {
    pub fn new(
        verifier: Arc<SignatureVerifier>,
        sessions: Arc<dyn SessionRepository>,
        rentals: Arc<dyn RentalRepository>,
        purchases: Arc<dyn PurchaseRepository>,
    ) -> Self {
        Self {
            verifier,
            sessions,
            rentals,
            purchases,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReconcilePaymentCommand,
    ) -> Result<ReconcileOutcome, WebhookError> {
        // 1. Verify the signature over the raw bytes
        if !self.verifier.verify(&cmd.raw_body, cmd.signature.as_deref()) {
            return Err(WebhookError::InvalidSignature);
        }

        // 2. Parse the body
        let payload: serde_json::Value =
            serde_json::from_slice(&cmd.raw_body).map_err(|_| WebhookError::InvalidJson)?;

        // 3. Only completion events settle sessions
        if !payload::is_completed_event(&payload) {
            return Ok(ReconcileOutcome::Ignored(IgnoreReason::EventType));
        }

        // 4. Correlate back to a session
        let Some(raw_correlation) = payload::extract_correlation_id(&payload) else {
            return Ok(ReconcileOutcome::Ignored(IgnoreReason::MissingCorrelation));
        };
        let correlation_id = CorrelationId::from_raw(raw_correlation);
        if correlation_id.decode().into_triple().is_none() {
            return Ok(ReconcileOutcome::Ignored(IgnoreReason::InvalidCorrelation));
        }

        let Some(with_game) = self
            .sessions
            .find_by_correlation_id(&correlation_id)
            .await?
        else {
            return Ok(ReconcileOutcome::Ignored(IgnoreReason::SessionNotFound));
        };

        // 5. Flip pending -> paid; losing this race means another delivery
        //    of the same event already settled the session
        let payment_ref = payload::extract_payment_reference(&payload);
        let settled = self
            .sessions
            .mark_paid(&with_game.session.id, payment_ref.as_deref())
            .await?;
        if !settled {
            return Ok(ReconcileOutcome::AlreadyProcessed);
        }

        // 6. Grant the entitlement the session was paying for
        self.grant_entitlement(&with_game, payment_ref.as_deref())
            .await?;

        tracing::info!(
            correlation_id = %correlation_id,
            mode = with_game.session.mode.as_str(),
            "checkout session settled from webhook"
        );

        Ok(ReconcileOutcome::Processed {
            correlation_id: correlation_id.as_str().to_string(),
            customer_email: payload::extract_customer_email(&payload),
        })
    }

    async fn grant_entitlement(
        &self,
        with_game: &SessionWithGame,
        payment_ref: Option<&str>,
    ) -> Result<(), WebhookError> {
        let session = &with_game.session;
        let now = Timestamp::now();

        match session.mode {
            CheckoutMode::Lifetime => {
                // One purchase row per (user, game); repeat payments only
                // refresh the reference
                match self
                    .purchases
                    .find_by_user_and_game(&session.user_id, &session.game_id)
                    .await?
                {
                    Some(existing) => {
                        self.purchases
                            .update_payment_ref(&existing.id, payment_ref)
                            .await?;
                    }
                    None => {
                        let purchase = Purchase::grant(
                            session.user_id,
                            session.game_id,
                            now,
                            payment_ref.map(str::to_string),
                        );
                        self.purchases.insert(&purchase).await?;
                    }
                }
            }
            CheckoutMode::Rental => {
                let duration_days = with_game.game.duration_days();
                match self
                    .rentals
                    .find_active(&session.user_id, &session.game_id)
                    .await?
                {
                    Some(current) => {
                        let new_expiry = current.renewed_expiry(now, duration_days);
                        self.rentals
                            .extend(&current.id, new_expiry, payment_ref)
                            .await?;
                    }
                    None => {
                        let rental = Rental::start(
                            session.user_id,
                            session.game_id,
                            now,
                            duration_days,
                            payment_ref.map(str::to_string),
                        );
                        self.rentals.insert(&rental).await?;
                    }
                }
            }
        }

        Ok(())
    }
}
