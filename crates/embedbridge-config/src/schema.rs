//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use embedbridge_core::{ArgumentEncoding, BridgeOptions};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Embedded object addressing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Id of the embedded object in the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,

    /// Scope key inserted under `content.`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_key: Option<String>,

    /// Explicit root path; disables host detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_prefix: Option<String>,

    #[serde(default)]
    pub argument_encoding: ArgumentEncoding,
}

impl BridgeConfig {
    /// Convert into bridge construction options.
    pub fn to_options(&self) -> Result<BridgeOptions, ConfigError> {
        let object_id = self
            .object_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfigError::MissingField("bridge.object_id".to_string()))?;

        let mut options = BridgeOptions::new(object_id)
            .with_scope_key(self.scope_key.as_deref())
            .with_encoding(self.argument_encoding);
        if let Some(prefix) = &self.root_prefix {
            options = options.with_root_prefix(prefix.clone());
        }
        Ok(options)
    }
}

/// Browser connection (Chrome DevTools Protocol).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Remote debugging endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Attach to an existing page instead of opening a new one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,

    /// Page to load before bridging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            target_id: None,
            url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rolling log files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Write log files in addition to the console.
    #[serde(default = "default_file_logging")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
            file: default_file_logging(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_logging() -> bool {
    true
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
