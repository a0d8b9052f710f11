//! TOML configuration for the daemon.
//!
//! ```toml
//! [logging]
//! format = "text"
//!
//! [[redistribute]]
//! proto = "kernel"
//! prefix = "10.0.0.0/8"
//! metric = 128
//!
//! [[redistribute]]
//! proto = "connected"
//! deny = true
//! ```
//!
//! Rules are evaluated in file order by [`RulePolicy`](crate::policy::RulePolicy).

use std::path::Path;

use serde::Deserialize;

use crate::error::DaemonError;

/// Top-level daemon configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaemonConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Redistribution rules, evaluated first match wins.
    #[serde(default)]
    pub redistribute: Vec<RedistributeEntry>,
}

/// The `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Output format, `"text"` or `"json"`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// One `[[redistribute]]` entry. Absent constraints match everything;
/// exactly one of `metric` or `deny` selects the action.
#[derive(Debug, Clone, Deserialize)]
pub struct RedistributeEntry {
    /// Match candidates of this origin protocol ("kernel", "static", ...).
    pub proto: Option<String>,

    /// Match destinations covered by this prefix.
    pub prefix: Option<String>,

    /// Match routes learned through this interface index.
    pub ifindex: Option<u32>,

    /// Export matching routes at this metric.
    pub metric: Option<u16>,

    /// Refuse to export matching routes.
    #[serde(default)]
    pub deny: bool,
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            format: default_log_format(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DaemonError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DaemonError::Config(format!("failed to read config file: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, DaemonError> {
        toml::from_str(content)
            .map_err(|e| DaemonError::Config(format!("failed to parse config: {e}")))
    }
}

// ============================================================================================== //
