//! Account Entity
//!
//! An internal account reconciled from an external identity. The external
//! subject is the reconciliation key and never changes after creation, even
//! if the provider's email or name for the identity drifts.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use oidc::VerifiedIdentity;

use crate::domain::value_object::public_id::PublicId;

/// Default difficulty preference for new accounts
pub const DEFAULT_DIFFICULTY: &str = "medium";

/// Default UI theme for new accounts
pub const DEFAULT_THEME: &str = "default";

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal primary key, never exposed to clients
    pub account_id: AccountId,
    /// Externally visible identifier
    pub public_id: PublicId,
    /// Identity provider's stable subject; immutable reconciliation key
    pub external_subject: String,
    /// Email as verified by the provider at last login
    pub email: String,
    /// Display name shown on the profile and leaderboard
    pub display_name: String,
    /// Profile image URL
    pub avatar_url: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last login timestamp
    pub last_login_at: DateTime<Utc>,
    /// Total quiz attempts recorded
    pub total_attempts: i64,
    /// Correct answers recorded; never exceeds total_attempts
    pub correct_answers: i64,
    /// Most recently practiced cipher, if any
    pub favorite_cipher: Option<String>,
    /// Preferred quiz difficulty
    pub difficulty_preference: String,
    /// Whether hints are shown during quizzes
    pub show_hints: bool,
    /// Whether to advance automatically after an answer
    pub auto_advance: bool,
    /// UI theme
    pub theme: String,
}

impl Account {
    /// Create a new account from a verified external identity
    pub fn from_identity(identity: &VerifiedIdentity) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            public_id: PublicId::new(),
            external_subject: identity.subject.clone(),
            email: identity.email.clone(),
            display_name: identity.given_name.clone(),
            avatar_url: identity.picture_url.clone(),
            created_at: now,
            last_login_at: now,
            total_attempts: 0,
            correct_answers: 0,
            favorite_cipher: None,
            difficulty_preference: DEFAULT_DIFFICULTY.to_string(),
            show_hints: true,
            auto_advance: true,
            theme: DEFAULT_THEME.to_string(),
        }
    }

    /// Answer accuracy as a percentage
    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct_answers, self.total_attempts)
    }
}

/// Accuracy percentage, rounded to one decimal place.
///
/// Zero attempts yields 0.0 rather than a division error.
pub fn accuracy(correct: i64, total: i64) -> f64 {
    let ratio = correct as f64 / total.max(1) as f64;
    (ratio * 1000.0).round() / 10.0
}

/// Partial update to profile fields and preferences
///
/// `None` fields are left untouched; counters and identity fields are not
/// patchable through this type at all.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub difficulty_preference: Option<String>,
    pub show_hints: Option<bool>,
    pub auto_advance: Option<bool>,
    pub theme: Option<String>,
}

impl ProfilePatch {
    /// Whether the patch changes anything at all
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.avatar_url.is_none()
            && self.difficulty_preference.is_none()
            && self.show_hints.is_none()
            && self.auto_advance.is_none()
            && self.theme.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> VerifiedIdentity {
        VerifiedIdentity {
            subject: "sub-123".to_string(),
            email: "ada@example.com".to_string(),
            given_name: "Ada".to_string(),
            picture_url: Some("https://img.example.com/ada.png".to_string()),
        }
    }

    #[test]
    fn test_from_identity_defaults() {
        let account = Account::from_identity(&identity());
        assert_eq!(account.external_subject, "sub-123");
        assert_eq!(account.display_name, "Ada");
        assert_eq!(account.total_attempts, 0);
        assert_eq!(account.correct_answers, 0);
        assert_eq!(account.favorite_cipher, None);
        assert_eq!(account.difficulty_preference, "medium");
        assert!(account.show_hints);
        assert!(account.auto_advance);
        assert_eq!(account.theme, "default");
        assert_eq!(account.created_at, account.last_login_at);
    }

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy(3, 5), 60.0);
        assert_eq!(accuracy(1, 3), 33.3);
        assert_eq!(accuracy(2, 3), 66.7);
        assert_eq!(accuracy(10, 10), 100.0);
    }

    #[test]
    fn test_accuracy_zero_attempts() {
        assert_eq!(accuracy(0, 0), 0.0);
    }

    #[test]
    fn test_profile_patch_is_empty() {
        assert!(ProfilePatch::default().is_empty());
        let patch = ProfilePatch {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
