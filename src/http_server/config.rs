//! Listener, CORS and request-body settings of the record API

use serde::{Deserialize, Serialize};

/// Largest accepted request body unless configured
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// `server` section of the service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,

    /// Browser origins allowed by CORS. Empty allows any origin.
    pub cors_origins: Vec<String>,

    /// Request bodies above this size are refused with 413
    pub body_limit_bytes: usize,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5080,
            cors_origins: ["http://localhost:4200", "http://localhost:3000"]
                .into_iter()
                .map(String::from)
                .collect(),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl HttpServerConfig {
    /// Default settings listening on `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as written in the config. The host may be a name.
    pub fn bind_target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
