//! Webhook reconciliation handler.

mod reconcile_payment;

pub use reconcile_payment::{ReconcilePaymentCommand, ReconcilePaymentHandler};
