use clap::Args;

use common::migrate::{Migrator, Operation};
use vault_copy::config::{Side, DEFAULT_TARGET_ROOT};

use super::{connect, TargetArgs, TraversalError};

/// Delete every secret under the target root
#[derive(Args, Debug, Clone)]
pub struct Delete {
    #[command(flatten)]
    pub target: TargetArgs,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = TraversalError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let target = ctx
            .config
            .target
            .merge(&self.target.store_config())
            .endpoint(Side::Target, DEFAULT_TARGET_ROOT)?;

        println!("Deleting from {}", target);

        let target_vault = connect(&target)?;

        ctx.confirm().await?;

        let mut migrator = Migrator::new();
        let count = migrator
            .delete(&target_vault, &target.root)
            .await
            .map_err(|source| TraversalError::Migrate {
                operation: Operation::Delete,
                count: migrator.count(),
                source,
            })?;

        Ok(format!("Deleted {} secrets from {}", count, target))
    }
}
