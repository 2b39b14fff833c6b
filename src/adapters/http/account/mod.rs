//! HTTP adapter for account endpoints.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::account_routes;
