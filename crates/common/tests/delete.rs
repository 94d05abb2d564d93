//! Integration tests for the delete and probe operations

mod support;

use common::migrate::Migrator;
use common::store::{MemorySecretStore, SecretStore};
use serde_json::json;
use support::{scenario_store, secret, Call, RecordingStore};

#[tokio::test]
async fn test_delete_removes_every_leaf() {
    let target = RecordingStore::new(scenario_store());
    let mut migrator = Migrator::new();

    let count = migrator.delete(&target, "r").await.unwrap();

    assert_eq!(count, 2);
    assert!(target.inner.is_empty().unwrap());
    assert_eq!(target.count(|c| matches!(c, Call::Delete(_))), 2);
    assert_eq!(target.count(|c| matches!(c, Call::Read(_))), 0);
}

#[tokio::test]
async fn test_delete_empty_subtree_is_a_no_op() {
    let target = RecordingStore::new(MemorySecretStore::new());
    let mut migrator = Migrator::new();

    let count = migrator.delete(&target, "t").await.unwrap();

    assert_eq!(count, 0);
    assert_eq!(target.calls(), vec![Call::List("t".to_string())]);

    // again, after a real delete
    let target = RecordingStore::new(scenario_store());
    migrator.delete(&target, "r").await.unwrap();
    let deletes = target.count(|c| matches!(c, Call::Delete(_)));
    migrator.delete(&target, "r").await.unwrap();
    assert_eq!(target.count(|c| matches!(c, Call::Delete(_))), deletes);
}

#[tokio::test]
async fn test_probe_reads_without_writing() {
    let target = RecordingStore::new(scenario_store());
    let mut migrator = Migrator::new();

    let count = migrator.probe(&target, "r").await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(target.count(|c| matches!(c, Call::Read(_))), 2);
    assert_eq!(
        target.count(|c| matches!(c, Call::Write(_) | Call::Delete(_))),
        0
    );
    assert_eq!(
        target.inner.read("r/b").await.unwrap(),
        secret(json!({"k": "v2", "n": 42}))
    );
}
