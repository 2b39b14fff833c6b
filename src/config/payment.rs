//! Payment provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment provider configuration (OpenPix)
#[derive(Debug, Default, Deserialize)]
pub struct PaymentConfig {
    /// Provider application id, echoed to the client so it can open the
    /// provider's payment widget
    pub app_id: Option<String>,

    /// Webhook signing secret. Unset means signature verification is
    /// disabled, which only lower environments may do.
    pub webhook_secret: Option<SecretString>,
}

impl PaymentConfig {
    /// Whether webhook signatures will be enforced
    pub fn enforces_signatures(&self) -> bool {
        self.webhook_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().trim().is_empty())
    }

    /// Validate payment configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production && !self.enforces_signatures() {
            return Err(ValidationError::WebhookSecretRequired);
        }
        Ok(())
    }
}
