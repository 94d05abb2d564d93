use std::{fs, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

pub const APP_NAME: &str = "vault-copy";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_SOURCE_ROOT: &str = "secret/";
pub const DEFAULT_TARGET_ROOT: &str = "secret/copy2";

/// Connection details for one Vault server. Every field can come from
///  the config file, a command line flag, or both (flags win).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Vault address, like https://vault.example.com:8200
    #[serde(default)]
    pub address: Option<Url>,
    /// Token sent as X-Vault-Token
    #[serde(default)]
    pub token: Option<String>,
    /// Path in the tree to start from
    #[serde(default)]
    pub root: Option<String>,
}

impl StoreConfig {
    /// Layer `overrides` on top of `self`, field by field
    pub fn merge(&self, overrides: &StoreConfig) -> StoreConfig {
        StoreConfig {
            address: overrides.address.clone().or_else(|| self.address.clone()),
            token: overrides.token.clone().or_else(|| self.token.clone()),
            root: overrides.root.clone().or_else(|| self.root.clone()),
        }
    }

    /// Resolve into a usable endpoint, falling back to `default_root`
    pub fn endpoint(&self, side: Side, default_root: &str) -> Result<Endpoint, ConfigError> {
        let address = self.address.clone().ok_or(ConfigError::MissingAddress(side))?;
        let root = self.root.clone().unwrap_or_else(|| default_root.to_string());
        if root.trim_matches('/').is_empty() {
            return Err(ConfigError::EmptyRoot(side));
        }

        Ok(Endpoint {
            address,
            token: self.token.clone(),
            root,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => write!(f, "source"),
            Side::Target => write!(f, "target"),
        }
    }
}

/// A fully resolved Vault server plus the root to work under
#[derive(Clone, PartialEq)]
pub struct Endpoint {
    pub address: Url,
    pub token: Option<String>,
    pub root: String,
}

// tokens stay out of debug output
impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("address", &self.address.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("root", &self.root)
            .finish()
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            self.address.as_str().trim_end_matches('/'),
            self.root
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level, RUST_LOG still takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for daily rolling log files (stdout only if not set)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.level.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: StoreConfig,
    #[serde(default)]
    pub target: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the config file path (custom or default ~/.vault-copy/config.toml)
    pub fn path(custom_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)).join(CONFIG_FILE_NAME))
    }

    /// Load the config file.
    ///
    /// An explicitly given path must exist. The default path is
    ///  optional, and its absence just means built-in defaults.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = custom_path.is_some();
        let path = match Self::path(custom_path) {
            Ok(path) => path,
            Err(ConfigError::NoHomeDirectory) => return Ok(Self::default()),
            Err(e) => return Err(e),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::MissingFile(path));
            }
            return Ok(Self::default());
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config_toml = fs::read_to_string(path)?;
        let config = toml::from_str(&config_toml)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("no home directory found")]
    NoHomeDirectory,
    #[error("config file not found: {0}")]
    MissingFile(PathBuf),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
    #[error("no {0} vault address given, set --{0}-addr or [{0}].address")]
    MissingAddress(Side),
    #[error("{0} root must not be empty")]
    EmptyRoot(Side),
}
