//! Payment webhook signature verification.
//!
//! The provider signs the raw request body with HMAC-SHA256 and sends the
//! digest in a header, encoded as either hex or base64 depending on the
//! integration vintage. Verification therefore runs over the exact body
//! bytes, before any JSON parsing.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Verifier for payment provider webhook signatures.
///
/// When no secret is configured verification trivially succeeds. This is an
/// escape hatch for lower environments without provider credentials; a
/// production deployment is expected to configure the secret.
pub struct SignatureVerifier {
    secret: Option<SecretString>,
}

impl SignatureVerifier {
    /// Creates a verifier with the given webhook secret.
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret: Some(secret),
        }
    }

    /// Creates a verifier that accepts every request.
    pub fn permissive() -> Self {
        Self { secret: None }
    }

    /// Creates a verifier from an optional configured secret. Blank secrets
    /// count as unconfigured.
    pub fn from_config(secret: Option<&SecretString>) -> Self {
        match secret {
            Some(s) if !s.expose_secret().trim().is_empty() => Self::new(SecretString::new(
                s.expose_secret().trim().to_string(),
            )),
            _ => Self::permissive(),
        }
    }

    /// Whether a secret is configured.
    pub fn is_enforcing(&self) -> bool {
        self.secret.is_some()
    }

    /// Verifies the signature header against the raw body bytes.
    ///
    /// Absent secret or absent header both verify trivially, matching the
    /// provider integration contract. A present header that fails to decode
    /// or does not match the HMAC fails verification.
    pub fn verify(&self, raw_body: &[u8], signature_header: Option<&str>) -> bool {
        let (Some(secret), Some(header)) = (&self.secret, signature_header) else {
            return true;
        };

        let Some(provided) = decode_signature(header) else {
            return false;
        };

        let expected = compute_hmac(secret.expose_secret().as_bytes(), raw_body);
        constant_time_compare(&expected, &provided)
    }
}

/// Computes HMAC-SHA256 of `payload` keyed with `secret`.
pub fn compute_hmac(secret: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

/// Decodes a signature header as hex or base64.
///
/// Pure hex-digit strings of even length are treated as hex; anything else
/// is attempted as standard base64. Returns None on decode failure.
fn decode_signature(header: &str) -> Option<Vec<u8>> {
    let trimmed = header.trim();
    if trimmed.is_empty() {
        return None;
    }

    let looks_hex =
        trimmed.len() % 2 == 0 && trimmed.bytes().all(|b| b.is_ascii_hexdigit());
    if looks_hex {
        return hex::decode(trimmed).ok();
    }

    BASE64.decode(trimmed).ok()
}

/// Constant-time comparison of two byte slices.
///
/// Prevents timing attacks that could leak information about the expected
/// signature. Differing lengths fail immediately; length is not secret.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
