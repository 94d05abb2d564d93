pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vault-copy")]
#[command(about = "Copy, delete or read back secret trees between Vault servers")]
pub struct Args {
    /// Path to the config file (defaults to ~/.vault-copy/config.toml)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Log level, overrides [logging].level from the config file
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: crate::Command,
}
