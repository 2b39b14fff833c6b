//! HTTP adapter for checkout endpoints.

pub mod dto;
pub mod handlers;
mod routes;

pub use routes::checkout_routes;
