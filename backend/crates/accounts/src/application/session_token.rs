//! Session Token Codec
//!
//! Cookie tokens are `{session_id}.{signature}` where the signature is an
//! HMAC-SHA256 over the session ID, base64url-encoded without padding. The
//! database never sees the signature; tampering is caught before any query.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};

/// Generate a signed session token
pub fn sign_session_token(secret: &[u8; 32], session_id: Uuid) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        session_id,
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Parse and verify a session token, returning the session ID
pub fn verify_session_token(secret: &[u8; 32], token: &str) -> AccountResult<Uuid> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 2 {
        return Err(AccountError::SessionInvalid);
    }

    let session_id_str = parts[0];
    let signature_b64 = parts[1];

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AccountError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AccountError::SessionInvalid)?;

    session_id_str
        .parse()
        .map_err(|_| AccountError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_round_trip() {
        let session_id = Uuid::new_v4();
        let token = sign_session_token(&SECRET, session_id);
        assert_eq!(verify_session_token(&SECRET, &token).unwrap(), session_id);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = sign_session_token(&SECRET, Uuid::new_v4());
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('A');
        assert!(verify_session_token(&SECRET, &tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session_token(&SECRET, Uuid::new_v4());
        let other = [9u8; 32];
        assert!(verify_session_token(&other, &token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(verify_session_token(&SECRET, "not-a-token").is_err());
        assert!(verify_session_token(&SECRET, "a.b.c").is_err());
        assert!(verify_session_token(&SECRET, "").is_err());
    }
}
