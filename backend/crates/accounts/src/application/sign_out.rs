//! Sign Out Use Case
//!
//! Deletes the server-side session. Cookie removal is the HTTP layer's job.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AccountResult;

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: SessionRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> SignOutUseCase<R>
where
    R: SessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    /// Delete the session behind the token.
    ///
    /// An invalid or already-deleted token is not an error worth surfacing;
    /// the caller clears the cookie either way.
    pub async fn execute(&self, session_token: &str) -> AccountResult<()> {
        let session_id = verify_session_token(&self.config.session_secret, session_token)?;
        self.repo.delete_session(session_id).await?;

        tracing::info!(session_id = %session_id, "Session signed out");

        Ok(())
    }
}
