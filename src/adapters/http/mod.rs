//! HTTP adapters - REST API implementations.

pub mod account;
pub mod app;
pub mod checkout;
mod error;
pub mod webhook;

pub use app::{build_router, AppState};
pub use error::{ApiError, ErrorBody};
