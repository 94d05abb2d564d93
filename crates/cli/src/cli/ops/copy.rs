use clap::Args;

use common::migrate::{Migrator, Operation};
use vault_copy::config::{Side, DEFAULT_SOURCE_ROOT, DEFAULT_TARGET_ROOT};

use super::{connect, SourceArgs, TargetArgs, TraversalError};

/// Copy every secret under the source root to the target root
#[derive(Args, Debug, Clone)]
pub struct Copy {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Copy values as-is instead of scrambling them on write
    #[arg(long)]
    pub keep_values: bool,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Copy {
    type Error = TraversalError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let source = ctx
            .config
            .source
            .merge(&self.source.store_config())
            .endpoint(Side::Source, DEFAULT_SOURCE_ROOT)?;
        let target = ctx
            .config
            .target
            .merge(&self.target.store_config())
            .endpoint(Side::Target, DEFAULT_TARGET_ROOT)?;
        let scramble = !self.keep_values;

        println!("Copying from {} to {}", source, target);
        if scramble {
            println!("Secret values will be scrambled on write, use --keep-values to copy them as-is");
        } else {
            println!("Secret values will be copied as-is, make sure target is secure.");
        }

        let source_vault = connect(&source)?;
        let target_vault = connect(&target)?;

        ctx.confirm().await?;

        let mut migrator = Migrator::new();
        let count = migrator
            .copy(
                &source_vault,
                &source.root,
                &target_vault,
                &target.root,
                scramble,
            )
            .await
            .map_err(|source| TraversalError::Migrate {
                operation: Operation::Copy,
                count: migrator.count(),
                source,
            })?;

        Ok(format!(
            "Copied {} secrets from {} to {}",
            count, source, target
        ))
    }
}
