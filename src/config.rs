//! Service configuration
//!
//! Loaded from a JSON file; every key is optional:
//!
//! ```json
//! {
//!   "server": { "host": "0.0.0.0", "port": 5080, "cors_origins": [] },
//!   "store": { "seed_file": "./seed.json", "max_rows_per_table": 10000 },
//!   "log_filter": "info"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;

/// Path tried when no config file is given
pub const DEFAULT_CONFIG_PATH: &str = "./cereal-api.json";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "CEREAL_CONFIG_READ",
            ConfigError::Parse(_) => "CEREAL_CONFIG_PARSE",
            ConfigError::Invalid(_) => "CEREAL_CONFIG_INVALID",
        }
    }
}

/// Store settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file loaded into the tables at boot
    #[serde(default)]
    pub seed_file: Option<PathBuf>,

    /// Row limit enforced at commit, per table
    #[serde(default)]
    pub max_rows_per_table: Option<usize>,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    /// `tracing` filter directive (default "info"); `RUST_LOG` wins when set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            store: StoreConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServiceConfig {
    /// Load and validate configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: ServiceConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the given file, or the default path when none is given.
    ///
    /// A missing file at the default path yields the defaults; an explicit
    /// path must exist.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }
        if self.store.max_rows_per_table == Some(0) {
            return Err(ConfigError::Invalid(
                "store.max_rows_per_table must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
