//! Object Storage Client
//!
//! Minimal client for a GCS-style object store, used for profile image
//! uploads. The store is an external collaborator: this module's contract is
//! "bytes in, public URL out", not the storage protocol itself.

use std::time::Duration;

/// Default outbound timeout for storage calls
pub const STORAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Error when talking to the object store
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// Network failure or timeout; the caller may retry
    #[error("Object storage unavailable: {0}")]
    Unavailable(String),

    /// The store accepted the connection but refused the object
    #[error("Object storage rejected upload: {0}")]
    Rejected(String),
}

/// Object store abstraction
///
/// Implementations must make the stored object publicly readable and return
/// its public URL.
#[trait_variant::make(ObjectStore: Send)]
pub trait LocalObjectStore {
    /// Store `bytes` under `name` with the given content type, publicly
    /// readable. Returns the public URL of the object.
    async fn put_public(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;
}

/// HTTP object store client (GCS-style media upload)
#[derive(Clone)]
pub struct HttpObjectStore {
    http: reqwest::Client,
    bucket: String,
    upload_base: String,
    public_base: String,
    auth_token: Option<String>,
}

impl HttpObjectStore {
    /// Create a client for the given bucket against the public GCS endpoints.
    pub fn new(bucket: impl Into<String>) -> Result<Self, StorageError> {
        Self::with_endpoint(bucket, "https://storage.googleapis.com")
    }

    /// Create a client against a custom endpoint (emulators, tests).
    pub fn with_endpoint(
        bucket: impl Into<String>,
        endpoint: &str,
    ) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .timeout(STORAGE_TIMEOUT)
            .build()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let endpoint = endpoint.trim_end_matches('/');

        Ok(Self {
            http,
            bucket: bucket.into(),
            upload_base: format!("{endpoint}/upload/storage/v1"),
            public_base: endpoint.to_string(),
            auth_token: None,
        })
    }

    /// Attach a bearer token for authenticated uploads.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Public URL of an object in this bucket.
    pub fn public_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.public_base, self.bucket, name)
    }
}

impl ObjectStore for HttpObjectStore {
    async fn put_public(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        // Object names are produced by us and contain only [a-z0-9_.-],
        // so they need no percent-encoding here.
        let url = format!(
            "{}/b/{}/o?uploadType=media&name={}&predefinedAcl=publicRead",
            self.upload_base, self.bucket, name
        );

        let mut request = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);

        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorageError::Rejected(format!(
                "status {}",
                response.status()
            )));
        }

        Ok(self.public_url(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        let store = HttpObjectStore::new("quiz-profile-images").unwrap();
        assert_eq!(
            store.public_url("user_ab12_cd34.png"),
            "https://storage.googleapis.com/quiz-profile-images/user_ab12_cd34.png"
        );
    }

    #[test]
    fn test_custom_endpoint_trailing_slash() {
        let store = HttpObjectStore::with_endpoint("bucket", "http://localhost:4443/").unwrap();
        assert_eq!(
            store.public_url("obj.jpg"),
            "http://localhost:4443/bucket/obj.jpg"
        );
    }
}
