//! HTTP adapter for the payment webhook.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::webhook_routes;
