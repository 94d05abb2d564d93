use crate::store::SecretStoreError;

/// A store call failed and the traversal was abandoned.
///
/// Every variant names the path that failed; nothing after it was
///  processed, and nothing before it was rolled back.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("failed to list {path}: {source}")]
    List {
        path: String,
        #[source]
        source: SecretStoreError,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: SecretStoreError,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: SecretStoreError,
    },
    #[error("failed to delete {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: SecretStoreError,
    },
}

impl MigrateError {
    /// The path whose store call failed
    pub fn path(&self) -> &str {
        match self {
            MigrateError::List { path, .. }
            | MigrateError::Read { path, .. }
            | MigrateError::Write { path, .. }
            | MigrateError::Delete { path, .. } => path,
        }
    }
}
