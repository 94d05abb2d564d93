use std::error::Error;
use std::path::PathBuf;

use vault_copy::config::{Config, ConfigError};
use vault_copy::prompt::{self, PromptError, CONFIRM_PROMPT};

#[derive(Debug, Clone)]
pub struct OpContext {
    /// Loaded config file (or defaults)
    pub config: Config,
    /// Proceed without asking
    pub assume_yes: bool,
}

impl OpContext {
    /// Create context from an optional config path
    pub fn new(config_path: Option<PathBuf>, assume_yes: bool) -> Result<Self, ConfigError> {
        Ok(Self {
            config: Config::load(config_path)?,
            assume_yes,
        })
    }

    /// Ask the operator before anything is touched, unless told not to
    pub async fn confirm(&self) -> Result<(), PromptError> {
        if self.assume_yes {
            return Ok(());
        }
        prompt::confirm(CONFIRM_PROMPT).await
    }
}

#[async_trait::async_trait]
pub trait Op: Send + Sync {
    type Error: Error + Send + Sync + 'static;
    type Output;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error>;
}

#[macro_export]
macro_rules! command_enum {
    ($(($variant:ident, $type:ty)),* $(,)?) => {
        #[derive(Subcommand, Debug, Clone)]
        pub enum Command {
            $($variant($type),)*
        }

        #[derive(Debug)]
        pub enum OpOutput {
            $($variant(<$type as $crate::cli::op::Op>::Output),)*
        }

        #[derive(Debug, thiserror::Error)]
        pub enum OpError {
            $(
                #[error(transparent)]
                $variant(<$type as $crate::cli::op::Op>::Error),
            )*
        }

        #[async_trait::async_trait]
        impl $crate::cli::op::Op for Command {
            type Output = OpOutput;
            type Error = OpError;

            async fn execute(&self, ctx: &$crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
                match self {
                    $(
                        Command::$variant(op) => {
                            op.execute(ctx).await
                                .map(OpOutput::$variant)
                                .map_err(OpError::$variant)
                        },
                    )*
                }
            }
        }

        impl std::fmt::Display for OpOutput {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        OpOutput::$variant(output) => write!(f, "{}", output),
                    )*
                }
            }
        }
    };
}
