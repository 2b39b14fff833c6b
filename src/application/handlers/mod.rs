//! Application command and query handlers, one module per bounded area.

pub mod account;
pub mod checkout;
pub mod webhook;
