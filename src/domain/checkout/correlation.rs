//! Correlation identifier codec.
//!
//! A correlation ID carries the (game, user, session) triple through the
//! payment provider as one opaque string and comes back verbatim in webhook
//! payloads. Encoding labels each component and joins them with a double
//! underscore:
//!
//! `game_<gameId>__user_<userId>__session_<sessionId>`
//!
//! The single underscore separates a label from its value, so a component
//! containing `_` would decode to the wrong split. Encoding rejects such
//! components instead of producing an ambiguous string; UUIDs always pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{CheckoutSessionId, GameId, UserId};

const FIELD_JOINER: &str = "__";
const LABEL_SEPARATOR: char = '_';

const GAME_LABEL: &str = "game";
const USER_LABEL: &str = "user";
const SESSION_LABEL: &str = "session";

/// Error raised when a component cannot be embedded unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Component '{component}' contains the delimiter character '_'")]
pub struct CorrelationEncodeError {
    pub component: &'static str,
}

/// Opaque correlation string round-tripped through the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Encodes three raw components into a correlation ID.
    ///
    /// # Errors
    ///
    /// Returns `CorrelationEncodeError` if any component contains an
    /// underscore, which would make decoding ambiguous.
    pub fn encode(
        game_id: &str,
        user_id: &str,
        session_id: &str,
    ) -> Result<Self, CorrelationEncodeError> {
        validate_component(game_id, "gameId")?;
        validate_component(user_id, "userId")?;
        validate_component(session_id, "sessionId")?;

        Ok(Self(format!(
            "{GAME_LABEL}{LABEL_SEPARATOR}{game_id}\
             {FIELD_JOINER}{USER_LABEL}{LABEL_SEPARATOR}{user_id}\
             {FIELD_JOINER}{SESSION_LABEL}{LABEL_SEPARATOR}{session_id}"
        )))
    }

    /// Encodes the typed triple. UUIDs never contain the delimiter, so this
    /// cannot fail.
    pub fn for_session(game_id: &GameId, user_id: &UserId, session_id: &CheckoutSessionId) -> Self {
        Self::encode(
            &game_id.to_string(),
            &user_id.to_string(),
            &session_id.to_string(),
        )
        .expect("UUID components never contain underscores")
    }

    /// Wraps a string received from the provider without validation.
    ///
    /// Decoding is where malformed input surfaces, as missing parts.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Decodes back into labeled components.
    ///
    /// Unknown labels are skipped and missing labels decode to `None`;
    /// callers treat an incomplete triple as "could not correlate" and
    /// ignore the event rather than fail.
    pub fn decode(&self) -> CorrelationParts {
        let mut parts = CorrelationParts::default();
        for segment in self.0.split(FIELD_JOINER) {
            let Some((label, value)) = segment.split_once(LABEL_SEPARATOR) else {
                continue;
            };
            match label {
                GAME_LABEL => parts.game_id = Some(value.to_string()),
                USER_LABEL => parts.user_id = Some(value.to_string()),
                SESSION_LABEL => parts.session_id = Some(value.to_string()),
                _ => {}
            }
        }
        parts
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_component(
    value: &str,
    component: &'static str,
) -> Result<(), CorrelationEncodeError> {
    if value.contains(LABEL_SEPARATOR) {
        return Err(CorrelationEncodeError { component });
    }
    Ok(())
}

/// Components recovered from a correlation ID. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationParts {
    pub game_id: Option<String>,
    pub user_id: Option<String>,
    pub session_id: Option<String>,
}

impl CorrelationParts {
    /// Returns the triple only when all three components are present.
    pub fn into_triple(self) -> Option<(String, String, String)> {
        Some((self.game_id?, self.user_id?, self.session_id?))
    }
}
