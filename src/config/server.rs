//! HTTP listener settings for the CuraLoop API.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_FILTER: &str = "info,curaloop=debug,tower_http=info";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Longest a single intake or check-in request may run.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Where the API listens and how the process reports.
///
/// Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Production switches logs to JSON.
    pub environment: Environment,
    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// Comma-separated origins for the care dashboard; unset allows any.
    pub cors_origins: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::Development,
            log_level: DEFAULT_LOG_FILTER.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Allowed CORS origins; blank entries are ignored.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}
