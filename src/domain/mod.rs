//! Domain layer - business rules with no I/O.

pub mod catalog;
pub mod checkout;
pub mod entitlement;
pub mod foundation;
pub mod webhook;
