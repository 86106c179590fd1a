//! Update Profile Use Case
//!
//! Applies a partial update to profile fields and preferences.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::entity::account::{Account, ProfilePatch};
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};

/// Update profile use case
pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        mut patch: ProfilePatch,
    ) -> AccountResult<Account> {
        if let Some(name) = &mut patch.display_name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(AccountError::Validation(
                    "display name cannot be empty".to_string(),
                ));
            }
            *name = trimmed.to_string();
        }

        let account = self.repo.apply_profile_patch(account_id, &patch).await?;

        tracing::debug!(account_id = %account_id, "Profile updated");

        Ok(account)
    }
}
