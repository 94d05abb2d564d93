use common::store::SecretStoreError;
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("vault address cannot carry a path: {0}")]
    InvalidAddress(String),
    #[error("vault token is not a valid header value")]
    InvalidToken,
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("unexpected response for {path}: {reason}")]
    MalformedResponse { path: String, reason: String },
}

impl From<VaultError> for SecretStoreError {
    fn from(err: VaultError) -> Self {
        SecretStoreError::Provider(anyhow::Error::new(err))
    }
}
