use async_trait::async_trait;

use crate::secret::SecretValue;

#[derive(thiserror::Error, Debug)]
pub enum SecretStoreError {
    /// Nothing exists at the path. Listing a missing path is
    ///  how an empty subtree is reported
    #[error("path not found: {0}")]
    NotFound(String),
    /// A listing came back in a shape that is not a set of
    ///  child names
    #[error("malformed listing at {path}: {reason}")]
    MalformedListing { path: String, reason: String },
    /// Anything else the backend reported -- transport,
    ///  auth, permissions, bad payloads
    #[error("unhandled secret store error: {0}")]
    Provider(#[from] anyhow::Error),
}

/// Capability interface over a hierarchical key/value secret backend.
///
/// Paths are `/` separated. Listing returns child names relative to the
///  listed path; a name ending in `/` is a directory that must be listed
///  in turn, anything else is a leaf holding a secret.
#[async_trait]
pub trait SecretStore: Send + Sync + std::fmt::Debug {
    /// Enumerate the immediate children of a path
    ///
    /// # Arguments
    /// * `path` - The path to list
    ///
    /// Should fail with the following errors to be considered
    ///  correct:
    /// * `Err(SecretStoreError::NotFound)` - Nothing lives under `path`
    /// * `Err(SecretStoreError::MalformedListing)` - The backend answered,
    ///    but not with a list of names
    async fn list(&self, path: &str) -> Result<Vec<String>, SecretStoreError>;

    /// Fetch the secret stored at a leaf path
    async fn read(&self, path: &str) -> Result<SecretValue, SecretStoreError>;

    /// Upsert the secret at a leaf path. This is a full overwrite,
    ///  fields missing from `value` do not survive.
    async fn write(&self, path: &str, value: &SecretValue) -> Result<(), SecretStoreError>;

    /// Remove the secret at a leaf path
    async fn delete(&self, path: &str) -> Result<(), SecretStoreError>;
}
