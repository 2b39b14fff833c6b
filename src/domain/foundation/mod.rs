//! Foundation types shared across all domain modules.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode};
pub use ids::{CheckoutSessionId, GameId, PurchaseId, RentalId, TicketId, UserId};
pub use timestamp::Timestamp;
