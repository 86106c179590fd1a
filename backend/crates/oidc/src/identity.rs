//! Verified Identity
//!
//! The claims handed to the account reconciler after a successful code
//! exchange. An instance of this type is proof that the provider vouched for
//! the email address; unverified identities never leave the OIDC crate.

/// Identity claims verified by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider's stable subject identifier (`sub` claim); reconciliation key
    pub subject: String,
    /// Verified email address
    pub email: String,
    /// Given name, falling back to the email local part
    pub given_name: String,
    /// Profile picture URL, if the provider supplied one
    pub picture_url: Option<String>,
}
