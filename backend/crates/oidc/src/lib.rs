//! OIDC (Identity Provider Client) Module
//!
//! Encapsulates the three-legged OAuth2 authorization-code grant against a
//! discovery-based OpenID Connect provider (Google in production):
//! - `config` - provider credentials and endpoints
//! - `client` - discovery, code exchange, userinfo
//! - `identity` - verified identity claims handed to the account reconciler
//!
//! ## Guarantees
//! - All outbound calls carry a bounded timeout (10s); failures surface as
//!   retryable `ProviderUnavailable`, never a panic
//! - Identities are only produced for verified email addresses
//! - No state beyond a short-TTL cache of the provider discovery document

pub mod client;
pub mod config;
pub mod error;
pub mod identity;

// Re-exports for convenience
pub use client::{OidcClient, ProviderMetadata};
pub use config::OidcConfig;
pub use error::{OidcError, OidcResult};
pub use identity::VerifiedIdentity;
