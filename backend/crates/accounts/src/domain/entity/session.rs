//! Session Entity
//!
//! Represents an authenticated account session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use kernel::id::AccountId;
use uuid::Uuid;

/// Account session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to Account
    pub account_id: AccountId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(account_id: AccountId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            account_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_not_expired() {
        let session = Session::new(AccountId::new(), Duration::days(7));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expired_session() {
        let session = Session::new(AccountId::new(), Duration::seconds(-1));
        assert!(session.is_expired());
    }

    #[test]
    fn test_touch_advances_activity() {
        let mut session = Session::new(AccountId::new(), Duration::days(7));
        let before = session.last_activity_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        session.touch();
        assert!(session.last_activity_at > before);
    }
}
