//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use uuid::Uuid;

use crate::domain::entity::{
    account::{Account, ProfilePatch},
    session::Session,
};
use crate::error::AccountResult;

/// Counter values after an atomic increment
#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot {
    pub total_attempts: i64,
    pub correct_answers: i64,
}

/// One leaderboard row, ordered by correct answers
#[derive(Debug, Clone)]
pub struct LeaderboardRow {
    pub display_name: String,
    pub correct_answers: i64,
    pub total_attempts: i64,
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account.
    ///
    /// Returns `DuplicateIdentity` when the external subject is already
    /// taken, so the caller can adopt the winning row instead.
    async fn create(&self, account: &Account) -> AccountResult<()>;

    /// Find account by internal ID
    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>>;

    /// Find account by external subject
    async fn find_by_subject(&self, subject: &str) -> AccountResult<Option<Account>>;

    /// Record a login timestamp
    async fn update_last_login(
        &self,
        account_id: &AccountId,
        at: DateTime<Utc>,
    ) -> AccountResult<()>;

    /// Apply a partial profile update and return the updated account
    async fn apply_profile_patch(
        &self,
        account_id: &AccountId,
        patch: &ProfilePatch,
    ) -> AccountResult<Account>;

    /// Atomically add to the stats counters, optionally replacing the
    /// favorite cipher, and return the resulting totals.
    ///
    /// Must be a single-statement increment so concurrent attempts from the
    /// same account never lose updates.
    async fn increment_stats(
        &self,
        account_id: &AccountId,
        attempts_delta: i64,
        correct_delta: i64,
        favorite_cipher: Option<&str>,
    ) -> AccountResult<StatsSnapshot>;

    /// Top accounts by correct answers; ties broken by account age (oldest
    /// first)
    async fn top_by_correct(&self, limit: i64) -> AccountResult<Vec<LeaderboardRow>>;

    /// Assign fresh public IDs to legacy rows that lack one.
    /// Returns the number of rows updated.
    async fn backfill_public_ids(&self) -> AccountResult<u64>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &Session) -> AccountResult<()>;

    /// Find session by ID
    async fn find_session(&self, session_id: Uuid) -> AccountResult<Option<Session>>;

    /// Update session activity
    async fn touch_session(&self, session: &Session) -> AccountResult<()>;

    /// Delete a session
    async fn delete_session(&self, session_id: Uuid) -> AccountResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired_sessions(&self) -> AccountResult<u64>;
}
