//! PublicId Value Object
//!
//! Externally visible account identifier: 32 lowercase hex characters
//! (128 bits of randomness). Decoupled from the database primary key so the
//! internal key never leaks into URLs or API payloads.
//!
//! ## Usage
//! ```rust
//! use accounts::domain::value_object::public_id::PublicId;
//!
//! let public_id = PublicId::new();
//! assert_eq!(public_id.as_str().len(), 32);
//! ```
use std::str::FromStr;

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Number of random bytes backing a public ID
const PUBLIC_ID_BYTES: usize = 16;

/// Hex length of a public ID
pub const PUBLIC_ID_LEN: usize = PUBLIC_ID_BYTES * 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicId(String);

impl PublicId {
    /// Generate a fresh random public ID
    #[inline]
    pub fn new() -> Self {
        Self(platform::crypto::random_hex(PUBLIC_ID_BYTES))
    }

    /// Parse and validate a public ID string
    pub fn parse_str(s: &str) -> AppResult<Self> {
        if s.len() != PUBLIC_ID_LEN
            || !s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(AppError::bad_request(format!("Invalid PublicId: {s:?}")));
        }
        Ok(Self(s.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for PublicId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        PublicId::parse_str(s)
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_new() {
        let public_id = PublicId::new();
        assert_eq!(public_id.as_str().len(), 32);
        assert!(public_id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_public_id_new_is_unique() {
        assert_ne!(PublicId::new(), PublicId::new());
    }

    #[test]
    fn test_public_id_parse_str() {
        let id_str = "0123456789abcdef0123456789abcdef";
        let public_id = PublicId::parse_str(id_str).unwrap();
        assert_eq!(public_id.as_str(), id_str);
    }

    #[test]
    fn test_public_id_parse_str_wrong_length() {
        assert!(PublicId::parse_str("abc123").is_err());
    }

    #[test]
    fn test_public_id_parse_str_uppercase_rejected() {
        assert!(PublicId::parse_str("0123456789ABCDEF0123456789ABCDEF").is_err());
    }

    #[test]
    fn test_public_id_from_str_trait() {
        let id_str = "ffffffffffffffffffffffffffffffff";
        let public_id: PublicId = id_str.parse().unwrap();
        assert_eq!(public_id.as_str(), id_str);
    }
}
