use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use super::error::MigrateError;
use crate::secret::{join, Entry};
use crate::store::{SecretStore, SecretStoreError};

/// The pair of paths a leaf maps to: where it was found while
///  walking, and where it lands under the target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPaths {
    pub source: String,
    pub target: String,
}

/// Receives every leaf the walker finds, in traversal order.
#[async_trait]
pub trait LeafVisitor: Send {
    async fn visit(&mut self, leaf: LeafPaths) -> Result<(), MigrateError>;
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = Result<(), MigrateError>> + Send + 'a>>;

/// List the immediate children of `path` and classify them.
///
/// A missing path or a listing that is not a set of names is an
///  empty subtree. Names that are empty once classified (`""` or a
///  bare `/`) would point back at `path` itself, so they are skipped.
///  Any other store error is fatal.
pub async fn list_children(
    store: &dyn SecretStore,
    path: &str,
) -> Result<Vec<Entry>, MigrateError> {
    match store.list(path).await {
        Ok(names) => Ok(names
            .iter()
            .map(|name| Entry::classify(name))
            .filter(|entry| {
                if entry.name().is_empty() {
                    tracing::warn!(path, "skipping empty name in listing");
                    return false;
                }
                true
            })
            .collect()),
        Err(SecretStoreError::NotFound(_)) => {
            tracing::debug!(path, "nothing to list");
            Ok(Vec::new())
        }
        Err(SecretStoreError::MalformedListing { reason, .. }) => {
            tracing::warn!(path, reason = %reason, "treating malformed listing as empty");
            Ok(Vec::new())
        }
        Err(source) => Err(MigrateError::List {
            path: path.to_string(),
            source,
        }),
    }
}

/// Walk everything under `source_root` depth first, handing each leaf to
///  `visitor` alongside its mirrored path under `target_root`.
///
/// Children are visited in the order the store lists them. A subtree is
///  finished before its next sibling is started, and the first error
///  stops the walk.
pub async fn walk<V>(
    store: &dyn SecretStore,
    source_root: &str,
    target_root: &str,
    visitor: &mut V,
) -> Result<(), MigrateError>
where
    V: LeafVisitor + ?Sized,
{
    walk_dir(
        store,
        source_root.to_string(),
        target_root.to_string(),
        visitor,
    )
    .await
}

fn walk_dir<'a, V>(
    store: &'a dyn SecretStore,
    source: String,
    target: String,
    visitor: &'a mut V,
) -> WalkFuture<'a>
where
    V: LeafVisitor + ?Sized,
{
    Box::pin(async move {
        for entry in list_children(store, &source).await? {
            let source_path = join(&source, entry.name());
            let target_path = join(&target, entry.name());

            match entry {
                Entry::Dir(_) => {
                    tracing::debug!(path = %source_path, "descending");
                    walk_dir(store, source_path, target_path, &mut *visitor).await?;
                }
                Entry::Leaf(_) => {
                    visitor
                        .visit(LeafPaths {
                            source: source_path,
                            target: target_path,
                        })
                        .await?;
                }
            }
        }
        Ok(())
    })
}
