//! Loose-schema access into provider webhook payloads.
//!
//! The payment provider has shipped several payload shapes over time (charge
//! events, transaction events, wrapped `data` envelopes), so every field is
//! probed through an ordered list of known locations instead of a fixed
//! struct. First non-empty hit wins.

use serde_json::Value;

/// Locations where the correlation identifier has been observed, in
/// precedence order.
const CORRELATION_PATHS: &[&[&str]] = &[
    &["correlationID"],
    &["charge", "correlationID"],
    &["data", "charge", "correlationID"],
    &["transaction", "correlationID"],
    &["eventData", "charge", "correlationID"],
];

const CUSTOMER_EMAIL_PATHS: &[&[&str]] = &[
    &["customerEmail"],
    &["customer", "email"],
    &["charge", "customer", "email"],
    &["transaction", "customer", "email"],
    &["data", "customer", "email"],
    &["data", "charge", "customer", "email"],
];

const PAYMENT_REF_PATHS: &[&[&str]] = &[
    &["transaction", "id"],
    &["charge", "id"],
    &["data", "transaction", "id"],
    &["id"],
];

const EVENT_TYPE_PATHS: &[&[&str]] = &[&["event"], &["type"], &["eventType"]];

/// Extracts the correlation identifier carried by the payload, if any.
pub fn extract_correlation_id(payload: &Value) -> Option<String> {
    probe_string(payload, CORRELATION_PATHS)
}

/// Extracts the paying customer's email, if the payload carries one.
pub fn extract_customer_email(payload: &Value) -> Option<String> {
    probe_string(payload, CUSTOMER_EMAIL_PATHS)
}

/// Extracts the provider-side transaction reference, if any. Numeric ids are
/// stringified since some payload shapes send them as numbers.
pub fn extract_payment_reference(payload: &Value) -> Option<String> {
    for path in PAYMENT_REF_PATHS {
        match walk(payload, path) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Whether the payload describes a completed payment.
///
/// A declared event type must mention "completed" (case-insensitive); a
/// payload without any event type is assumed completed, since the earliest
/// provider format carried none.
pub fn is_completed_event(payload: &Value) -> bool {
    match probe_string(payload, EVENT_TYPE_PATHS) {
        Some(event_type) => event_type.to_lowercase().contains("completed"),
        None => true,
    }
}

fn probe_string(payload: &Value, paths: &[&[&str]]) -> Option<String> {
    for path in paths {
        if let Some(Value::String(s)) = walk(payload, path) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn walk<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}
