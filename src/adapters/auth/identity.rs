//! Identity service adapter for bearer token validation.
//!
//! Implements the `SessionValidator` port against the identity service's
//! `/auth/v1/user` endpoint: the user's token goes in the Authorization
//! header, the publishable key in `apikey`, and a 2xx answer carries the
//! user record the token belongs to.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

use crate::config::IdentityConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Validates tokens against the hosted identity service.
pub struct IdentitySessionValidator {
    client: reqwest::Client,
    base_url: String,
    anon_key: SecretString,
}

/// User record returned by the identity service.
#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl IdentitySessionValidator {
    pub fn new(config: &IdentityConfig) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            anon_key: config.anon_key.clone(),
        })
    }
}

#[async_trait]
impl SessionValidator for IdentitySessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("apikey", self.anon_key.expose_secret())
            .send()
            .await
            .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?;

        if response.status().is_server_error() {
            return Err(AuthError::ServiceUnavailable(format!(
                "identity service answered {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(AuthError::InvalidToken);
        }

        let user: IdentityUser = response
            .json()
            .await
            .map_err(|e| AuthError::ServiceUnavailable(e.to_string()))?;

        let id = UserId::from_str(&user.id).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(id, user.email))
    }
}
