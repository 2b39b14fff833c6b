//! Checkout session lifecycle: pending records awaiting settlement.

mod correlation;
mod errors;
mod session;

pub use correlation::{CorrelationEncodeError, CorrelationId, CorrelationParts};
pub use errors::CheckoutError;
pub use session::{
    CheckoutMode, CheckoutSession, SessionStatus, DEFAULT_EXPIRES_IN_SECS,
};
