use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use super::provider::{SecretStore, SecretStoreError};
use crate::secret::{normalize, SecretValue, SEPARATOR};

/// In-memory secret store keyed by normalized leaf path.
///
/// Listings are derived from the stored leaf paths, so a directory
///  exists exactly as long as some leaf lives beneath it. Listing a
///  path with nothing under it reports `NotFound`, like a KV engine
///  does over HTTP.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    inner: Arc<RwLock<BTreeMap<String, SecretValue>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemorySecretStoreError {
    #[error("memory store error: {0}")]
    Internal(String),
}

impl From<MemorySecretStoreError> for SecretStoreError {
    fn from(err: MemorySecretStoreError) -> Self {
        SecretStoreError::Provider(err.into())
    }
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with secrets
    pub fn with_secrets<I, P>(secrets: I) -> Self
    where
        I: IntoIterator<Item = (P, SecretValue)>,
        P: AsRef<str>,
    {
        let store = Self::new();
        {
            // a fresh lock can't be poisoned
            let mut inner = store.inner.write().unwrap_or_else(|e| e.into_inner());
            for (path, value) in secrets {
                inner.insert(normalize(path.as_ref()), value);
            }
        }
        store
    }

    /// Copy of every stored secret, keyed by normalized path
    pub fn snapshot(&self) -> Result<BTreeMap<String, SecretValue>, MemorySecretStoreError> {
        let inner = self.inner.read().map_err(|e| {
            MemorySecretStoreError::Internal(format!("failed to acquire read lock: {}", e))
        })?;
        Ok(inner.clone())
    }

    pub fn len(&self) -> Result<usize, MemorySecretStoreError> {
        let inner = self.inner.read().map_err(|e| {
            MemorySecretStoreError::Internal(format!("failed to acquire read lock: {}", e))
        })?;
        Ok(inner.len())
    }

    pub fn is_empty(&self) -> Result<bool, MemorySecretStoreError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn list(&self, path: &str) -> Result<Vec<String>, SecretStoreError> {
        let inner = self.inner.read().map_err(|e| {
            MemorySecretStoreError::Internal(format!("failed to acquire read lock: {}", e))
        })?;

        let prefix = match normalize(path) {
            p if p.is_empty() => String::new(),
            p => format!("{}{}", p, SEPARATOR),
        };

        let mut children = BTreeSet::new();
        for key in inner.keys() {
            let Some(relative) = key.strip_prefix(&prefix) else {
                continue;
            };
            match relative.find(SEPARATOR) {
                Some(pos) => children.insert(format!("{}{}", &relative[..pos], SEPARATOR)),
                None => children.insert(relative.to_string()),
            };
        }

        if children.is_empty() {
            return Err(SecretStoreError::NotFound(path.to_string()));
        }

        Ok(children.into_iter().collect())
    }

    async fn read(&self, path: &str) -> Result<SecretValue, SecretStoreError> {
        let inner = self.inner.read().map_err(|e| {
            MemorySecretStoreError::Internal(format!("failed to acquire read lock: {}", e))
        })?;

        inner
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| SecretStoreError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, value: &SecretValue) -> Result<(), SecretStoreError> {
        let mut inner = self.inner.write().map_err(|e| {
            MemorySecretStoreError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        inner.insert(normalize(path), value.clone());
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), SecretStoreError> {
        let mut inner = self.inner.write().map_err(|e| {
            MemorySecretStoreError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        // deleting a missing secret is not an error for KV engines either
        inner.remove(&normalize(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(k: &str, v: &str) -> SecretValue {
        [(k, v)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_list_marks_directories() {
        let store = MemorySecretStore::with_secrets([
            ("r/a/x", secret("k", "1")),
            ("r/a/y", secret("k", "2")),
            ("r/b", secret("k", "3")),
            ("r/c/d/e", secret("k", "4")),
        ]);

        let children = store.list("r").await.unwrap();
        assert_eq!(children, vec!["a/", "b", "c/"]);

        let children = store.list("/r/c/").await.unwrap();
        assert_eq!(children, vec!["d/"]);
    }

    #[tokio::test]
    async fn test_list_missing_is_not_found() {
        let store = MemorySecretStore::with_secrets([("r/b", secret("k", "3"))]);

        let result = store.list("nope").await;
        assert!(matches!(result, Err(SecretStoreError::NotFound(_))));

        // a leaf is not a directory
        let result = store.list("r/b").await;
        assert!(matches!(result, Err(SecretStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_does_not_match_sibling_prefixes() {
        let store = MemorySecretStore::with_secrets([
            ("r/ab/x", secret("k", "1")),
            ("r/a/y", secret("k", "2")),
        ]);

        let children = store.list("r/a").await.unwrap();
        assert_eq!(children, vec!["y"]);
    }

    #[tokio::test]
    async fn test_write_overwrites_and_delete_removes() {
        let store = MemorySecretStore::new();

        store.write("/t/b", &secret("k", "1")).await.unwrap();
        let mut replacement = secret("other", "2");
        replacement.insert("more", "3");
        store.write("t/b", &replacement).await.unwrap();

        let value = store.read("t/b").await.unwrap();
        assert_eq!(value, replacement);
        assert!(value.get("k").is_none());

        store.delete("t/b").await.unwrap();
        assert!(store.is_empty().unwrap());
        assert!(matches!(
            store.read("t/b").await,
            Err(SecretStoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_poisoned_lock_is_an_error() {
        let store = MemorySecretStore::with_secrets([("t/a", secret("k", "1"))]);
        assert_eq!(store.len().unwrap(), 1);

        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(
            store.len(),
            Err(MemorySecretStoreError::Internal(_))
        ));
        assert!(store.is_empty().is_err());
        assert!(store.snapshot().is_err());
    }
}
