//! OIDC Client
//!
//! Discovery, authorization redirect construction, code exchange, and
//! userinfo retrieval. The client is stateless across calls except for the
//! cached discovery document.

use std::time::Instant;

use reqwest::Url;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::{OidcConfig, REQUESTED_SCOPES};
use crate::error::{OidcError, OidcResult};
use crate::identity::VerifiedIdentity;

/// Endpoints extracted from the provider's discovery document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    authorization_endpoint: Option<String>,
    token_endpoint: Option<String>,
    userinfo_endpoint: Option<String>,
}

impl ProviderMetadata {
    /// Parse and validate a discovery document.
    ///
    /// Any missing or empty required field is a `ProviderConfigError` naming
    /// the field.
    pub fn from_json(body: &str) -> OidcResult<Self> {
        let raw: RawMetadata = serde_json::from_str(body)
            .map_err(|e| OidcError::ProviderConfigError(format!("unparseable discovery document: {e}")))?;

        fn require(field: Option<String>, name: &str) -> OidcResult<String> {
            field
                .filter(|s| !s.is_empty())
                .ok_or_else(|| OidcError::ProviderConfigError(format!("discovery document missing `{name}`")))
        }

        Ok(Self {
            authorization_endpoint: require(raw.authorization_endpoint, "authorization_endpoint")?,
            token_endpoint: require(raw.token_endpoint, "token_endpoint")?,
            userinfo_endpoint: require(raw.userinfo_endpoint, "userinfo_endpoint")?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Raw userinfo claims as returned by the provider
#[derive(Debug, Deserialize)]
pub struct UserInfoClaims {
    sub: Option<String>,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    given_name: Option<String>,
    picture: Option<String>,
}

impl UserInfoClaims {
    /// Validate claims into a [`VerifiedIdentity`].
    ///
    /// Rejects identities whose email the provider has not verified; this is
    /// the single gate through which identities reach the reconciler.
    pub fn into_identity(self) -> OidcResult<VerifiedIdentity> {
        let subject = self
            .sub
            .filter(|s| !s.is_empty())
            .ok_or_else(|| OidcError::MalformedResponse("userinfo missing `sub`".to_string()))?;
        let email = self
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| OidcError::MalformedResponse("userinfo missing `email`".to_string()))?;

        if !self.email_verified {
            return Err(OidcError::EmailNotVerified);
        }

        // Providers are not obliged to send given_name; the email local part
        // is a serviceable display name until the user edits it.
        let given_name = self
            .given_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or(&email).to_string());

        Ok(VerifiedIdentity {
            subject,
            email,
            given_name,
            picture_url: self.picture.filter(|p| !p.is_empty()),
        })
    }
}

/// Build the provider authorization URL for the code grant.
pub fn build_authorization_url(
    metadata: &ProviderMetadata,
    client_id: &str,
    callback_url: &str,
) -> OidcResult<Url> {
    let mut url = Url::parse(&metadata.authorization_endpoint).map_err(|e| {
        OidcError::ProviderConfigError(format!("invalid authorization endpoint: {e}"))
    })?;

    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", callback_url)
        .append_pair("scope", REQUESTED_SCOPES);

    Ok(url)
}

/// Identity provider client
///
/// Holds immutable configuration plus the discovery-document cache. Wrapped
/// in an `Arc` and shared across requests by the HTTP layer.
pub struct OidcClient {
    http: reqwest::Client,
    config: OidcConfig,
    discovery_cache: RwLock<Option<(Instant, ProviderMetadata)>>,
}

impl OidcClient {
    pub fn new(config: OidcConfig) -> OidcResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OidcError::ProviderConfigError(e.to_string()))?;

        Ok(Self {
            http,
            config,
            discovery_cache: RwLock::new(None),
        })
    }

    /// Provider endpoints, from cache or a fresh discovery fetch.
    async fn metadata(&self) -> OidcResult<ProviderMetadata> {
        if let Some((fetched_at, metadata)) = self.discovery_cache.read().await.as_ref() {
            if fetched_at.elapsed() < self.config.discovery_ttl {
                return Ok(metadata.clone());
            }
        }

        let body = self
            .http
            .get(&self.config.discovery_url)
            .send()
            .await
            .map_err(|e| OidcError::ProviderUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| OidcError::ProviderUnavailable(e.to_string()))?
            .text()
            .await
            .map_err(|e| OidcError::ProviderUnavailable(e.to_string()))?;

        let metadata = ProviderMetadata::from_json(&body)?;

        tracing::info!(
            authorization_endpoint = %metadata.authorization_endpoint,
            "Fetched provider discovery document"
        );

        *self.discovery_cache.write().await = Some((Instant::now(), metadata.clone()));

        Ok(metadata)
    }

    /// Build the redirect URL that starts the authorization-code grant.
    pub async fn authorization_redirect(&self, callback_url: &str) -> OidcResult<Url> {
        let metadata = self.metadata().await?;
        build_authorization_url(&metadata, &self.config.client_id, callback_url)
    }

    /// Exchange an authorization code for a verified identity.
    ///
    /// Posts the code to the token endpoint with client credentials, then
    /// fetches the userinfo claims with the resulting access token.
    pub async fn exchange_code(
        &self,
        code: &str,
        callback_url: &str,
    ) -> OidcResult<VerifiedIdentity> {
        if code.is_empty() {
            return Err(OidcError::MissingAuthorizationCode);
        }

        let metadata = self.metadata().await?;

        let response = self
            .http
            .post(&metadata.token_endpoint)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", callback_url),
            ])
            .send()
            .await
            .map_err(|e| OidcError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(OidcError::ProviderUnavailable(format!(
                "token endpoint returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(OidcError::MalformedResponse(format!(
                "token endpoint returned {status}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        let access_token = token.access_token.filter(|t| !t.is_empty()).ok_or_else(|| {
            OidcError::MalformedResponse("token response missing `access_token`".to_string())
        })?;

        let claims: UserInfoClaims = self
            .http
            .get(&metadata.userinfo_endpoint)
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(|e| OidcError::ProviderUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| OidcError::ProviderUnavailable(e.to_string()))?
            .json()
            .await?;

        let identity = claims.into_identity()?;

        tracing::debug!(subject = %identity.subject, "Exchanged authorization code");

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DISCOVERY: &str = r#"{
        "authorization_endpoint": "https://accounts.example.com/o/oauth2/auth",
        "token_endpoint": "https://oauth2.example.com/token",
        "userinfo_endpoint": "https://openidconnect.example.com/v1/userinfo"
    }"#;

    #[test]
    fn test_metadata_from_json() {
        let metadata = ProviderMetadata::from_json(FULL_DISCOVERY).unwrap();
        assert_eq!(
            metadata.authorization_endpoint,
            "https://accounts.example.com/o/oauth2/auth"
        );
        assert_eq!(metadata.token_endpoint, "https://oauth2.example.com/token");
    }

    #[test]
    fn test_metadata_missing_field() {
        let body = r#"{"authorization_endpoint": "https://a.example", "token_endpoint": "https://t.example"}"#;
        let err = ProviderMetadata::from_json(body).unwrap_err();
        match err {
            OidcError::ProviderConfigError(msg) => assert!(msg.contains("userinfo_endpoint")),
            other => panic!("expected ProviderConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_metadata_unparseable() {
        let err = ProviderMetadata::from_json("not json").unwrap_err();
        assert!(matches!(err, OidcError::ProviderConfigError(_)));
    }

    #[test]
    fn test_authorization_url() {
        let metadata = ProviderMetadata::from_json(FULL_DISCOVERY).unwrap();
        let url = build_authorization_url(
            &metadata,
            "client-123",
            "https://quiz.example.com/login/callback",
        )
        .unwrap();

        assert!(url.as_str().starts_with("https://accounts.example.com/o/oauth2/auth?"));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("client_id".into(), "client-123".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "https://quiz.example.com/login/callback".into()
        )));
        assert!(pairs.contains(&("scope".into(), "openid email profile".into())));
    }

    fn claims(email_verified: bool) -> UserInfoClaims {
        UserInfoClaims {
            sub: Some("sub-123".to_string()),
            email: Some("a@b.com".to_string()),
            email_verified,
            given_name: Some("Ada".to_string()),
            picture: Some("https://img.example.com/p.png".to_string()),
        }
    }

    #[test]
    fn test_claims_verified() {
        let identity = claims(true).into_identity().unwrap();
        assert_eq!(identity.subject, "sub-123");
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.given_name, "Ada");
        assert_eq!(
            identity.picture_url.as_deref(),
            Some("https://img.example.com/p.png")
        );
    }

    #[test]
    fn test_claims_unverified_email_rejected() {
        let err = claims(false).into_identity().unwrap_err();
        assert!(matches!(err, OidcError::EmailNotVerified));
    }

    #[test]
    fn test_claims_missing_subject() {
        let mut c = claims(true);
        c.sub = None;
        assert!(matches!(
            c.into_identity().unwrap_err(),
            OidcError::MalformedResponse(_)
        ));
    }

    #[test]
    fn test_claims_given_name_fallback() {
        let mut c = claims(true);
        c.given_name = None;
        let identity = c.into_identity().unwrap();
        assert_eq!(identity.given_name, "a");
    }

    #[test]
    fn test_claims_default_email_verified_is_false() {
        let parsed: UserInfoClaims =
            serde_json::from_str(r#"{"sub": "s", "email": "x@y.z"}"#).unwrap();
        assert!(matches!(
            parsed.into_identity().unwrap_err(),
            OidcError::EmailNotVerified
        ));
    }
}
