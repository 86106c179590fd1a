//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL (1 week)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Externally reachable base URL, used to build the OAuth callback URL
    pub public_base_url: String,
    /// Where the browser lands after a successful login
    pub post_login_redirect: String,
    /// Where the browser lands after logout
    pub post_logout_redirect: String,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "quiz_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            public_base_url: "http://localhost:8080".to_string(),
            post_login_redirect: "/dashboard".to_string(),
            post_logout_redirect: "/".to_string(),
        }
    }
}

impl AccountsConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Get session TTL in seconds (for cookie Max-Age)
    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl.as_secs()
    }

    /// OAuth callback URL derived from the public base URL
    pub fn callback_url(&self) -> String {
        format!(
            "{}/login/callback",
            self.public_base_url.trim_end_matches('/')
        )
    }

    /// Cookie configuration derived from this config
    pub fn cookie(&self) -> platform::cookie::CookieConfig {
        platform::cookie::CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_url_trailing_slash() {
        let config = AccountsConfig {
            public_base_url: "https://quiz.example.com/".to_string(),
            ..AccountsConfig::development()
        };
        assert_eq!(
            config.callback_url(),
            "https://quiz.example.com/login/callback"
        );
    }

    #[test]
    fn test_development_is_insecure() {
        let config = AccountsConfig::development();
        assert!(!config.cookie_secure);
        assert_ne!(config.session_secret, [0u8; 32]);
    }
}
