use clap::Args;
use url::Url;

use common::migrate::{MigrateError, Operation};
use vault_copy::config::{ConfigError, Endpoint, StoreConfig};
use vault_copy::prompt::PromptError;
use vault_copy::vault::{VaultClient, VaultError};

pub mod copy;
pub mod delete;
pub mod read;
pub mod version;

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Vault address to copy from, like https://example.com:8200
    #[arg(long)]
    pub source_addr: Option<Url>,

    /// Token for the source vault, best to have read privileges only
    #[arg(long)]
    pub source_token: Option<String>,

    /// Root in the source tree to start copying from [default: secret/]
    #[arg(long)]
    pub source_root: Option<String>,
}

impl SourceArgs {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            address: self.source_addr.clone(),
            token: self.source_token.clone(),
            root: self.source_root.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Vault address to work on, like https://example2.com:8200
    #[arg(long)]
    pub target_addr: Option<Url>,

    /// Token for the target vault, needs write privileges to copy or delete
    #[arg(long)]
    pub target_token: Option<String>,

    /// Root in the target tree [default: secret/copy2]
    #[arg(long)]
    pub target_root: Option<String>,
}

impl TargetArgs {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            address: self.target_addr.clone(),
            token: self.target_token.clone(),
            root: self.target_root.clone(),
        }
    }
}

/// Everything that can stop a copy, delete or read traversal
#[derive(Debug, thiserror::Error)]
pub enum TraversalError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to create vault client: {0}")]
    Vault(#[from] VaultError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error("{operation} stopped after {count} secrets: {source}")]
    Migrate {
        operation: Operation,
        count: u64,
        #[source]
        source: MigrateError,
    },
}

pub fn connect(endpoint: &Endpoint) -> Result<VaultClient, VaultError> {
    VaultClient::new(&endpoint.address, endpoint.token.as_deref())
}

#[cfg(test)]
#[path = "../../../tests/support/mod.rs"]
mod fake_vault;
