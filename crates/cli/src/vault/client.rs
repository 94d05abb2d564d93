use async_trait::async_trait;
use reqwest::{header::HeaderMap, header::HeaderValue, Client, Response, StatusCode};
use serde_json::Value;
use url::Url;

use common::secret::{normalize, SecretValue};
use common::store::{SecretStore, SecretStoreError};

use super::error::VaultError;

pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Secret store backed by the Vault HTTP API (KV version 1 semantics).
///
/// Paths are mount-relative the way the Vault CLI takes them, e.g.
///  `secret/app/db`, and are sent as `/v1/<path>`.
#[derive(Debug, Clone)]
pub struct VaultClient {
    pub address: Url,
    client: Client,
}

impl VaultClient {
    pub fn new(address: &Url, token: Option<&str>) -> Result<Self, VaultError> {
        if address.cannot_be_a_base() {
            return Err(VaultError::InvalidAddress(address.to_string()));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(token).map_err(|_| VaultError::InvalidToken)?;
            value.set_sensitive(true);
            default_headers.insert(TOKEN_HEADER, value);
        }
        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            address: address.clone(),
            client,
        })
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> &Url {
        &self.address
    }

    fn url(&self, path: &str) -> Result<Url, VaultError> {
        let mut url = self.address.clone();
        let normalized = normalize(path);
        url.path_segments_mut()
            .map_err(|_| VaultError::InvalidAddress(self.address.to_string()))?
            .pop_if_empty()
            .push("v1")
            .extend(normalized.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    async fn check(response: Response) -> Result<Response, VaultError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(VaultError::HttpStatus(status, response.text().await?))
        }
    }
}

/// Pull the child names out of a LIST response
fn parse_keys(path: &str, body: &Value) -> Result<Vec<String>, SecretStoreError> {
    let malformed = |reason: &str| SecretStoreError::MalformedListing {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let keys = body
        .get("data")
        .and_then(|data| data.get("keys"))
        .ok_or_else(|| malformed("no data.keys in response"))?
        .as_array()
        .ok_or_else(|| malformed("data.keys is not an array"))?;

    keys.iter()
        .map(|key| {
            key.as_str()
                .map(str::to_string)
                .ok_or_else(|| malformed("data.keys holds a non-string entry"))
        })
        .collect()
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn list(&self, path: &str) -> Result<Vec<String>, SecretStoreError> {
        let mut url = self.url(path)?;
        url.query_pairs_mut().append_pair("list", "true");

        let response = self.client.get(url).send().await.map_err(VaultError::from)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SecretStoreError::NotFound(path.to_string()));
        }

        let response = Self::check(response).await?;
        // an empty body is as good as no keys
        let body = response.text().await.map_err(VaultError::from)?;
        if body.trim().is_empty() {
            return Err(SecretStoreError::NotFound(path.to_string()));
        }
        let body: Value = serde_json::from_str(&body).map_err(|e| {
            SecretStoreError::MalformedListing {
                path: path.to_string(),
                reason: e.to_string(),
            }
        })?;

        parse_keys(path, &body)
    }

    async fn read(&self, path: &str) -> Result<SecretValue, SecretStoreError> {
        let url = self.url(path)?;

        let response = self.client.get(url).send().await.map_err(VaultError::from)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(SecretStoreError::NotFound(path.to_string()));
        }

        let response = Self::check(response).await?;
        let mut body: Value = response.json().await.map_err(VaultError::from)?;
        let data = body
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| VaultError::MalformedResponse {
                path: path.to_string(),
                reason: "no data in response".to_string(),
            })?;

        SecretValue::from_json(data).ok_or_else(|| {
            VaultError::MalformedResponse {
                path: path.to_string(),
                reason: "data is not an object".to_string(),
            }
            .into()
        })
    }

    async fn write(&self, path: &str, value: &SecretValue) -> Result<(), SecretStoreError> {
        let url = self.url(path)?;

        let response = self
            .client
            .put(url)
            .json(&value.to_json())
            .send()
            .await
            .map_err(VaultError::from)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), SecretStoreError> {
        let url = self.url(path)?;

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(VaultError::from)?;
        Self::check(response).await?;
        Ok(())
    }
}
