//! Upload Profile Image Use Case
//!
//! Validates the uploaded image, stores it publicly, and points the
//! account's avatar at the stored object.

use std::sync::Arc;

use platform::storage::ObjectStore;

use crate::domain::entity::account::{Account, ProfilePatch};
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};

/// Maximum accepted image size
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Upload profile image use case
pub struct UploadImageUseCase<R, S>
where
    R: AccountRepository,
    S: ObjectStore,
{
    repo: Arc<R>,
    store: Arc<S>,
}

impl<R, S> UploadImageUseCase<R, S>
where
    R: AccountRepository,
    S: ObjectStore,
{
    pub fn new(repo: Arc<R>, store: Arc<S>) -> Self {
        Self { repo, store }
    }

    /// Store the image and return its public URL.
    ///
    /// The avatar URL is only updated after the store confirms the upload;
    /// a storage failure leaves the profile untouched.
    pub async fn execute(
        &self,
        account: &Account,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AccountResult<String> {
        let extension = match content_type {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            other => return Err(AccountError::UnsupportedImageType(other.to_string())),
        };

        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AccountError::ImageTooLarge);
        }

        // Random suffix so a re-upload never collides with a cached object
        let object_name = format!(
            "user_{}_{}.{}",
            account.public_id,
            platform::crypto::random_hex(8),
            extension
        );

        let url = self.store.put_public(&object_name, content_type, bytes).await?;

        let patch = ProfilePatch {
            avatar_url: Some(url.clone()),
            ..Default::default()
        };
        self.repo
            .apply_profile_patch(&account.account_id, &patch)
            .await?;

        tracing::info!(
            public_id = %account.public_id,
            object_name = %object_name,
            "Profile image uploaded"
        );

        Ok(url)
    }
}
