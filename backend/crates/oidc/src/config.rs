//! OIDC Client Configuration
//!
//! Immutable, per-process configuration for the identity provider client.
//! Built once in the API entry point and passed explicitly; there is no
//! global mutable client state.

use std::time::Duration;

/// Google's OIDC discovery document
pub const GOOGLE_DISCOVERY_URL: &str =
    "https://accounts.google.com/.well-known/openid-configuration";

/// Scopes requested for every authorization redirect
pub const REQUESTED_SCOPES: &str = "openid email profile";

/// OIDC client configuration
#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// OAuth2 client identifier issued by the provider
    pub client_id: String,
    /// OAuth2 client secret issued by the provider
    pub client_secret: String,
    /// URL of the provider's discovery document
    pub discovery_url: String,
    /// Timeout applied to every outbound provider call
    pub timeout: Duration,
    /// How long a fetched discovery document may be reused
    pub discovery_ttl: Duration,
}

impl OidcConfig {
    /// Configuration for Google as the identity provider
    pub fn google(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            discovery_url: GOOGLE_DISCOVERY_URL.to_string(),
            timeout: Duration::from_secs(10),
            discovery_ttl: Duration::from_secs(3600),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_defaults() {
        let config = OidcConfig::google("id", "secret");
        assert_eq!(config.discovery_url, GOOGLE_DISCOVERY_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.discovery_ttl, Duration::from_secs(3600));
    }
}
