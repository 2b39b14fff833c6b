//! Entitlements: the durable grants resulting from settled sessions.

mod purchase;
mod rental;

pub use purchase::Purchase;
pub use rental::{Rental, RentalStatus};
