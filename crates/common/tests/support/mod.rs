//! Shared test utilities for migration integration tests
#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use common::secret::{normalize, SecretValue};
use common::store::{MemorySecretStore, SecretStore, SecretStoreError};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(String),
    Read(String),
    Write(String),
    Delete(String),
}

/// Memory store that records every call made against it and can be
///  told to fail one specific call
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: MemorySecretStore,
    calls: Mutex<Vec<Call>>,
    fail_on: Mutex<Option<Call>>,
}

impl RecordingStore {
    pub fn new(inner: MemorySecretStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
        }
    }

    pub fn fail_on(self, call: Call) -> Self {
        *self.fail_on.lock().unwrap() = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) -> Result<(), SecretStoreError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.fail_on.lock().unwrap().as_ref() == Some(&call) {
            return Err(SecretStoreError::Provider(anyhow::anyhow!(
                "injected failure on {:?}",
                call
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SecretStore for RecordingStore {
    async fn list(&self, path: &str) -> Result<Vec<String>, SecretStoreError> {
        self.record(Call::List(normalize(path)))?;
        self.inner.list(path).await
    }

    async fn read(&self, path: &str) -> Result<SecretValue, SecretStoreError> {
        self.record(Call::Read(normalize(path)))?;
        self.inner.read(path).await
    }

    async fn write(&self, path: &str, value: &SecretValue) -> Result<(), SecretStoreError> {
        self.record(Call::Write(normalize(path)))?;
        self.inner.write(path, value).await
    }

    async fn delete(&self, path: &str) -> Result<(), SecretStoreError> {
        self.record(Call::Delete(normalize(path)))?;
        self.inner.delete(path).await
    }
}

pub fn secret(value: serde_json::Value) -> SecretValue {
    SecretValue::from_json(value).unwrap()
}

/// The tree `{ r/a/x: {k: v1}, r/b: {k: v2, n: 42} }`
pub fn scenario_store() -> MemorySecretStore {
    MemorySecretStore::with_secrets([
        ("r/a/x", secret(json!({"k": "v1"}))),
        ("r/b", secret(json!({"k": "v2", "n": 42}))),
    ])
}
