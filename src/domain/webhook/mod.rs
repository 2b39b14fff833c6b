//! Payment provider webhook handling: signature verification, payload
//! probing, and reconciliation outcomes.

mod errors;
pub mod payload;
mod signature;

pub use errors::{IgnoreReason, ReconcileOutcome, WebhookError};
pub use signature::{compute_hmac, SignatureVerifier};
