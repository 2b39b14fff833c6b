//! Authentication adapters.

mod identity;
mod mock;

pub use identity::IdentitySessionValidator;
pub use mock::MockSessionValidator;
