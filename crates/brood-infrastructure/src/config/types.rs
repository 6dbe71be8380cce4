//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_VALIDATE_SCOPES};
use crate::di::ProviderOptions;
use brood_domain::value_objects::BindPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Container behavior
    #[serde(default)]
    pub containers: ContainerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Container behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Policy when a child's parent reference is bound to a different provider
    pub bind_policy: BindPolicy,

    /// Reject scoped resolutions from root providers
    pub validate_scopes: bool,
}

impl ContainerConfig {
    /// Options for providers built under this configuration
    pub fn provider_options(&self) -> ProviderOptions {
        ProviderOptions {
            validate_scopes: self.validate_scopes,
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            bind_policy: BindPolicy::default(),
            validate_scopes: DEFAULT_VALIDATE_SCOPES,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
