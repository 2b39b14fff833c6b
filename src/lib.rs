//! Ludoteca - Game Rental Storefront Backend
//!
//! This crate implements the payment core of a game-rental storefront:
//! checkout session creation and asynchronous payment-provider webhook
//! reconciliation into rental and purchase entitlements.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
