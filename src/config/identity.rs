//! Identity service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Identity service configuration (bearer token validation)
#[derive(Debug, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the identity service
    pub base_url: String,

    /// Publishable API key sent alongside user tokens
    pub anon_key: SecretString,
}

impl IdentityConfig {
    /// Whether both identity credentials are present. Reported in the status
    /// document.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty() && !self.anon_key.expose_secret().trim().is_empty()
    }

    /// Validate identity configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("IDENTITY__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidIdentityUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::IdentityMustBeHttps);
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> IdentityConfig {
        IdentityConfig {
            base_url: base_url.to_string(),
            anon_key: SecretString::new("anon_xxx".to_string()),
        }
    }

    #[test]
    fn https_url_passes_everywhere() {
        let c = config("https://id.example.com");
        assert!(c.validate(&Environment::Development).is_ok());
        assert!(c.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn http_url_fails_in_production() {
        let c = config("http://localhost:9999");
        assert!(c.validate(&Environment::Development).is_ok());
        assert!(matches!(
            c.validate(&Environment::Production),
            Err(ValidationError::IdentityMustBeHttps)
        ));
    }

    #[test]
    fn non_http_scheme_fails() {
        assert!(matches!(
            config("ftp://id.example.com").validate(&Environment::Development),
            Err(ValidationError::InvalidIdentityUrl)
        ));
    }

    #[test]
    fn configured_requires_both_credentials() {
        assert!(config("https://id.example.com").is_configured());
        assert!(!config("  ").is_configured());
        let blank_key = IdentityConfig {
            base_url: "https://id.example.com".to_string(),
            anon_key: SecretString::new(String::new()),
        };
        assert!(!blank_key.is_configured());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        assert_eq!(
            config("https://id.example.com/").normalized_base_url(),
            "https://id.example.com"
        );
    }
}
