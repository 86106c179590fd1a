//! Check Session Use Case
//!
//! Verifies the cookie token and resolves it to a live account.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::error::{AccountError, AccountResult};

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> CheckSessionUseCase<R>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve a session token to the current account state.
    ///
    /// The account row is reloaded on every call; profile and stats reads
    /// never serve data cached at login time.
    pub async fn current_account(&self, session_token: &str) -> AccountResult<Account> {
        let session_id = verify_session_token(&self.config.session_secret, session_token)?;

        let session = self
            .repo
            .find_session(session_id)
            .await?
            .ok_or(AccountError::Unauthenticated)?;

        if session.is_expired() {
            self.repo.delete_session(session_id).await?;
            return Err(AccountError::Unauthenticated);
        }

        let account = self
            .repo
            .find_by_id(&session.account_id)
            .await?
            .ok_or(AccountError::Unauthenticated)?;

        // Update last activity (fire and forget)
        let mut session = session;
        session.touch();

        let repo = self.repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.touch_session(&session).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(account)
    }

    /// Just check if the token resolves to a valid session (returns bool)
    pub async fn is_valid(&self, session_token: &str) -> bool {
        self.current_account(session_token).await.is_ok()
    }
}
