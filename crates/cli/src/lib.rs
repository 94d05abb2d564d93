// Vault HTTP adapter for the secret store interface
pub mod vault;

// Config file, endpoint resolution
pub mod config;

// Logging setup
pub mod process;

// Operator confirmation
pub mod prompt;

pub use config::{Config, ConfigError, Endpoint};
pub use vault::{VaultClient, VaultError};
