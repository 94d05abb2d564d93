use std::fmt;

use async_trait::async_trait;

use super::error::MigrateError;
use super::walker::{walk, LeafPaths, LeafVisitor};
use crate::scramble::Scrambler;
use crate::store::SecretStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read every leaf under the source root and write it under
    ///  the target root
    Copy,
    /// Delete every leaf under the target root
    Delete,
    /// Read every leaf under the target root and throw it away
    Probe,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Copy => write!(f, "copy"),
            Operation::Delete => write!(f, "delete"),
            Operation::Probe => write!(f, "read"),
        }
    }
}

/// The fixed parameters of one traversal.
///
/// Delete and probe only touch the target store, so for those the
///  source side points at the target as well.
#[derive(Clone, Copy)]
pub struct MigrationContext<'a> {
    pub source: &'a dyn SecretStore,
    pub source_root: &'a str,
    pub target: &'a dyn SecretStore,
    pub target_root: &'a str,
    pub scramble: bool,
    pub operation: Operation,
}

impl<'a> MigrationContext<'a> {
    pub fn copy(
        source: &'a dyn SecretStore,
        source_root: &'a str,
        target: &'a dyn SecretStore,
        target_root: &'a str,
        scramble: bool,
    ) -> Self {
        Self {
            source,
            source_root,
            target,
            target_root,
            scramble,
            operation: Operation::Copy,
        }
    }

    pub fn delete(target: &'a dyn SecretStore, target_root: &'a str) -> Self {
        Self::target_only(target, target_root, Operation::Delete)
    }

    pub fn probe(target: &'a dyn SecretStore, target_root: &'a str) -> Self {
        Self::target_only(target, target_root, Operation::Probe)
    }

    fn target_only(target: &'a dyn SecretStore, target_root: &'a str, operation: Operation) -> Self {
        Self {
            source: target,
            source_root: target_root,
            target,
            target_root,
            scramble: false,
            operation,
        }
    }
}

/// Count of leaves processed successfully. Only ever goes up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ItemCounter(u64);

impl ItemCounter {
    pub fn increment(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Drives copy, delete and probe traversals over secret stores.
///
/// Leaves are handled one at a time: a leaf's read, scramble and
///  write all finish before the next leaf is touched. The first
///  failing store call stops the traversal; whatever was written
///  before it stays written, and `count` reports exactly the leaves
///  that made it.
#[derive(Debug, Default)]
pub struct Migrator {
    counter: ItemCounter,
    scrambler: Scrambler,
}

impl Migrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific scrambler, e.g. a seeded one
    pub fn with_scrambler(scrambler: Scrambler) -> Self {
        Self {
            counter: ItemCounter::default(),
            scrambler,
        }
    }

    /// Leaves processed so far, across every traversal this migrator ran
    pub fn count(&self) -> u64 {
        self.counter.get()
    }

    /// Copy every secret under `source_root` to the same relative path
    ///  under `target_root`, scrambling values first when asked to.
    pub async fn copy(
        &mut self,
        source: &dyn SecretStore,
        source_root: &str,
        target: &dyn SecretStore,
        target_root: &str,
        scramble: bool,
    ) -> Result<u64, MigrateError> {
        let ctx = MigrationContext::copy(source, source_root, target, target_root, scramble);
        self.run(&ctx).await
    }

    /// Delete every secret under `target_root`
    pub async fn delete(
        &mut self,
        target: &dyn SecretStore,
        target_root: &str,
    ) -> Result<u64, MigrateError> {
        let ctx = MigrationContext::delete(target, target_root);
        self.run(&ctx).await
    }

    /// Read every secret under `target_root` without changing anything
    pub async fn probe(
        &mut self,
        target: &dyn SecretStore,
        target_root: &str,
    ) -> Result<u64, MigrateError> {
        let ctx = MigrationContext::probe(target, target_root);
        self.run(&ctx).await
    }

    pub async fn run(&mut self, ctx: &MigrationContext<'_>) -> Result<u64, MigrateError> {
        tracing::info!(
            operation = %ctx.operation,
            source_root = ctx.source_root,
            target_root = ctx.target_root,
            scramble = ctx.scramble,
            "starting traversal"
        );

        let mut handler = LeafHandler {
            ctx,
            migrator: &mut *self,
        };
        walk(ctx.source, ctx.source_root, ctx.target_root, &mut handler).await?;

        tracing::info!(operation = %ctx.operation, count = self.count(), "traversal finished");
        Ok(self.count())
    }

    async fn copy_leaf(
        &mut self,
        ctx: &MigrationContext<'_>,
        leaf: LeafPaths,
    ) -> Result<(), MigrateError> {
        let mut value = ctx
            .source
            .read(&leaf.source)
            .await
            .map_err(|source| MigrateError::Read {
                path: leaf.source.clone(),
                source,
            })?;

        if ctx.scramble {
            self.scrambler.scramble(&mut value);
        }

        ctx.target
            .write(&leaf.target, &value)
            .await
            .map_err(|source| MigrateError::Write {
                path: leaf.target.clone(),
                source,
            })?;

        let count = self.counter.increment();
        tracing::info!(
            source = %leaf.source,
            target = %leaf.target,
            count,
            "wrote secret"
        );
        Ok(())
    }

    async fn delete_leaf(
        &mut self,
        ctx: &MigrationContext<'_>,
        leaf: LeafPaths,
    ) -> Result<(), MigrateError> {
        ctx.target
            .delete(&leaf.target)
            .await
            .map_err(|source| MigrateError::Delete {
                path: leaf.target.clone(),
                source,
            })?;

        let count = self.counter.increment();
        tracing::info!(path = %leaf.target, count, "deleted secret");
        Ok(())
    }

    async fn probe_leaf(
        &mut self,
        ctx: &MigrationContext<'_>,
        leaf: LeafPaths,
    ) -> Result<(), MigrateError> {
        ctx.target
            .read(&leaf.target)
            .await
            .map_err(|source| MigrateError::Read {
                path: leaf.target.clone(),
                source,
            })?;

        let count = self.counter.increment();
        tracing::info!(path = %leaf.target, count, "read secret");
        Ok(())
    }
}

struct LeafHandler<'a, 'b> {
    ctx: &'a MigrationContext<'b>,
    migrator: &'a mut Migrator,
}

#[async_trait]
impl<'a, 'b> LeafVisitor for LeafHandler<'a, 'b> {
    async fn visit(&mut self, leaf: LeafPaths) -> Result<(), MigrateError> {
        match self.ctx.operation {
            Operation::Copy => self.migrator.copy_leaf(self.ctx, leaf).await,
            Operation::Delete => self.migrator.delete_leaf(self.ctx, leaf).await,
            Operation::Probe => self.migrator.probe_leaf(self.ctx, leaf).await,
        }
    }
}
