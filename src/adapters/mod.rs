//! Adapters connecting the application core to the outside world.
//!
//! HTTP (axum), PostgreSQL (sqlx), and the identity service (reqwest).

pub mod auth;
pub mod http;
pub mod postgres;
