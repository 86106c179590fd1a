//! Reconcile Login Use Case
//!
//! Maps a verified external identity to an internal account, creating the
//! account on first login, and opens a session.

use std::sync::Arc;

use chrono::{Duration, Utc};
use oidc::VerifiedIdentity;

use crate::application::config::AccountsConfig;
use crate::application::session_token::sign_session_token;
use crate::domain::entity::{account::Account, session::Session};
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::error::{AccountError, AccountResult};

/// Reconcile login output
pub struct ReconcileOutput {
    /// Session token for cookie
    pub session_token: String,
    /// Public ID of the reconciled account
    pub public_id: String,
    /// Whether this login created the account
    pub created: bool,
}

/// Reconcile login use case
pub struct ReconcileLoginUseCase<R>
where
    R: AccountRepository + SessionRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> ReconcileLoginUseCase<R>
where
    R: AccountRepository + SessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, identity: VerifiedIdentity) -> AccountResult<ReconcileOutput> {
        let (account, created) = self.find_or_create(&identity).await?;

        self.repo
            .update_last_login(&account.account_id, Utc::now())
            .await?;

        let ttl = Duration::milliseconds(self.config.session_ttl_ms());
        let session = Session::new(account.account_id, ttl);
        self.repo.create_session(&session).await?;

        let session_token = sign_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            public_id = %account.public_id,
            session_id = %session.session_id,
            created,
            "Login reconciled"
        );

        Ok(ReconcileOutput {
            session_token,
            public_id: account.public_id.to_string(),
            created,
        })
    }

    /// Find the account for this subject, creating it on first login.
    ///
    /// Two concurrent first logins race on the unique subject constraint; the
    /// loser re-reads and adopts the winner's row.
    async fn find_or_create(
        &self,
        identity: &VerifiedIdentity,
    ) -> AccountResult<(Account, bool)> {
        if let Some(account) = self.repo.find_by_subject(&identity.subject).await? {
            return Ok((account, false));
        }

        let account = Account::from_identity(identity);
        match self.repo.create(&account).await {
            Ok(()) => Ok((account, true)),
            Err(AccountError::DuplicateIdentity) => {
                tracing::info!(
                    subject = %identity.subject,
                    "Lost account-creation race, adopting existing account"
                );
                let account = self
                    .repo
                    .find_by_subject(&identity.subject)
                    .await?
                    .ok_or_else(|| {
                        AccountError::Internal(
                            "account vanished after duplicate-create".to_string(),
                        )
                    })?;
                Ok((account, false))
            }
            Err(e) => Err(e),
        }
    }
}
