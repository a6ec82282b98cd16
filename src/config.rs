use crate::error::{ImportError, Result};
use serde::Deserialize;
use std::fs;

/// Validation switches consumed by the pipeline. Callers pass these
/// explicitly into `parse_roster` rather than reading ambient state.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportOptions {
    /// Flag repeated bib numbers within the batch as errors
    #[serde(default = "default_true")]
    pub check_duplicate_bib: bool,

    /// Derive the age-group bucket from birth date and gender
    #[serde(default = "default_true")]
    pub auto_age_group: bool,

    /// Accepted for operator parity but consulted by no validation or
    /// payload rule; see DESIGN.md
    #[serde(default)]
    pub update_existing: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            check_duplicate_bib: true,
            auto_age_group: true,
            update_existing: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub base_url: String,
    /// Bearer key; ROSTER_STORE_API_KEY in the environment takes over when absent
    pub api_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// File-log settings. Console logging is always on; the file copy only
/// exists when a directory is configured.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Directory for the daily-rotated JSON log; unset disables file logging
    pub dir: Option<String>,

    /// Default tracing filter, overridable with RUST_LOG
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: Some("logs".to_string()),
            filter: default_log_filter(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    #[serde(default)]
    pub import: ImportOptions,
    #[serde(default)]
    pub logging: LogConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(config_path: &str) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            ImportError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_log_filter() -> String {
    "roster_importer=info".to_string()
}
