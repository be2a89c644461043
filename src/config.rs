//! Configuration types for flowscan

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    pub telemetry: TelemetryConfig,
}

/// Market-data provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Quote endpoint root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Socket timeout for one provider round trip, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://query2.finance.yahoo.com".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; flowscan/0.1)".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Scan configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Volume baseline multiplier (exposed control range 1.0-10.0)
    #[serde(default = "default_threshold")]
    pub volume_threshold: f64,

    /// Open-interest baseline multiplier (exposed control range 1.0-10.0)
    #[serde(default = "default_threshold")]
    pub oi_threshold: f64,

    /// File remembering the last scanned ticker between runs
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
}

fn default_threshold() -> f64 {
    2.0
}
fn default_history_path() -> PathBuf {
    PathBuf::from("last_ticker.txt")
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            volume_threshold: default_threshold(),
            oi_threshold: default_threshold(),
            history_path: default_history_path(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
