//! Configuration management for the Pulse news signal service.
//!
//! Configuration lives in a single JSON file at `~/.pulse/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Explicit config file values
//! 2. Environment variables (PULSE_* prefix, plus NEWS_API_KEY)
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `NEWS_API_KEY` → news.api_key
//! - `PULSE_NEWS_PORT` → service.port
//! - `PULSE_BIND_ADDRESS` → service.host
//! - `PULSE_SIGNAL_PATH` → signal.path
//! - `PULSE_LOG_LEVEL` → observability.log_level
//!
//! A missing news API key is the only configuration error that is fatal at
//! startup; everything else falls back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".pulse"),
        |dirs| dirs.home_dir().join(".pulse"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// News Source Configuration
// ============================================================================

/// News article source (NewsAPI) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSourceConfig {
    /// NewsAPI key. Required; the service refuses to start without it.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base endpoint for article retrieval.
    #[serde(default = "default_news_endpoint")]
    pub endpoint: String,

    /// Topic superset query handed to the article source. Relevance filtering
    /// proper happens in the pipeline, not here.
    #[serde(default = "default_news_query")]
    pub query: String,

    /// Article language filter.
    #[serde(default = "default_news_language")]
    pub language: String,

    /// Recency window in hours for article retrieval.
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,

    /// Maximum number of articles per retrieval.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for NewsSourceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_news_endpoint(),
            query: default_news_query(),
            language: default_news_language(),
            window_hours: default_window_hours(),
            page_size: default_page_size(),
        }
    }
}

fn default_news_endpoint() -> String {
    "https://newsapi.org/v2/everything".into()
}

fn default_news_query() -> String {
    "employment OR jobs OR labor OR payroll".into()
}

fn default_news_language() -> String {
    "en".into()
}

fn default_window_hours() -> u32 {
    24
}

fn default_page_size() -> u32 {
    100
}

// ============================================================================
// Service Configuration
// ============================================================================

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bind address. Default: "127.0.0.1" (local only).
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port for the invocation surface.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    4450
}

// ============================================================================
// Signal Sink Configuration
// ============================================================================

/// Output format for the persisted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkFormat {
    /// Structured record: `{"value": .., "timestamp": .., "key": ..}`
    Json,
    /// Plain text: `<impact>|<title>|<description>`
    Delimited,
}

impl Default for SinkFormat {
    fn default() -> Self {
        Self::Json
    }
}

/// Signal sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Serialization format for the signal file.
    #[serde(default)]
    pub sink_format: SinkFormat,

    /// Path of the signal file. Overwritten on every publish; last successful
    /// write wins.
    #[serde(default = "default_signal_path")]
    pub path: PathBuf,

    /// Identifier constant included in structured records so the downstream
    /// consumer can recognize this signal type.
    #[serde(default = "default_signal_key")]
    pub key: String,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sink_format: SinkFormat::default(),
            path: default_signal_path(),
            key: default_signal_key(),
        }
    }
}

fn default_signal_path() -> PathBuf {
    PathBuf::from("news_signal.txt")
}

fn default_signal_key() -> String {
    "news_signal".into()
}

// ============================================================================
// Impact Weights
// ============================================================================

/// Weights combining title and description sentiment into one impact score.
///
/// Headline sentiment is weighted higher than body sentiment. The weights
/// must sum to 1.0; anything else is rejected at load time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpactWeights {
    #[serde(default = "default_title_weight")]
    pub title: f64,
    #[serde(default = "default_description_weight")]
    pub description: f64,
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            description: default_description_weight(),
        }
    }
}

impl ImpactWeights {
    /// Check that the weights form a convex combination.
    pub fn is_valid(&self) -> bool {
        self.title >= 0.0
            && self.description >= 0.0
            && (self.title + self.description - 1.0).abs() < 1e-9
    }
}

fn default_title_weight() -> f64 {
    0.6
}

fn default_description_weight() -> f64 {
    0.4
}

// ============================================================================
// Scheduler Configuration
// ============================================================================

/// Polling scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the background polling loop runs at all. The HTTP trigger
    /// works either way.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between aggregation passes.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Seconds to wait after a failed pass before trying again.
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_secs: default_interval_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    300
}

fn default_error_backoff_secs() -> u64 {
    60
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" for structured JSON, "pretty" for human-readable.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration for the Pulse news signal service.
///
/// Constructed once at process start and passed by reference into the
/// pipeline; core components never perform ambient lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Article source settings
    #[serde(default)]
    pub news: NewsSourceConfig,

    /// HTTP service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Signal sink settings
    #[serde(default)]
    pub signal: SignalConfig,

    /// Title/description sentiment weights
    #[serde(default)]
    pub weights: ImpactWeights,

    /// Polling scheduler settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Logging settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path, apply environment overrides,
    /// and validate.
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::info!("Config file not found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path. No env overrides, no
    /// validation; callers compose those as needed.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("NEWS_API_KEY") {
            if !key.is_empty() {
                self.news.api_key = Some(key);
            }
        }
        if let Ok(port) = std::env::var("PULSE_NEWS_PORT") {
            if let Ok(p) = port.parse() {
                self.service.port = p;
            }
        }
        if let Ok(bind) = std::env::var("PULSE_BIND_ADDRESS") {
            self.service.host = bind;
        }
        if let Ok(path) = std::env::var("PULSE_SIGNAL_PATH") {
            self.signal.path = PathBuf::from(path);
        }
        if let Ok(level) = std::env::var("PULSE_LOG_LEVEL") {
            self.observability.log_level = level;
        }
    }

    /// Validate the configuration.
    ///
    /// Startup-fatal conditions: a missing news API key and impact weights
    /// that do not sum to 1.0. Everything else degrades at runtime instead.
    pub fn validate(&self) -> Result<()> {
        if self.news.api_key.as_deref().unwrap_or("").is_empty() {
            anyhow::bail!(
                "NEWS_API_KEY not found in config or environment; \
                 the article source cannot be used without it"
            );
        }
        if !self.weights.is_valid() {
            anyhow::bail!(
                "Impact weights must be non-negative and sum to 1.0 \
                 (got title={}, description={})",
                self.weights.title,
                self.weights.description
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.news.query, "employment OR jobs OR labor OR payroll");
        assert_eq!(config.news.window_hours, 24);
        assert_eq!(config.service.port, 4450);
        assert_eq!(config.signal.key, "news_signal");
        assert_eq!(config.scheduler.interval_secs, 300);
        assert_eq!(config.scheduler.error_backoff_secs, 60);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ImpactWeights::default();
        assert_eq!(weights.title, 0.6);
        assert_eq!(weights.description, 0.4);
        assert!(weights.is_valid());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut config = Config::default();
        config.news.api_key = Some("test-key".into());
        config.weights.title = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("NEWS_API_KEY"));
    }

    #[test]
    fn test_empty_api_key_is_fatal() {
        let mut config = Config::default();
        config.news.api_key = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config_passes() {
        let mut config = Config::default();
        config.news.api_key = Some("test-key".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "news": {"api_key": "abc123", "window_hours": 12},
                "signal": {"sink_format": "delimited", "path": "/tmp/sig.txt"},
                "weights": {"title": 0.7, "description": 0.3}
            }"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.news.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.news.window_hours, 12);
        assert_eq!(config.signal.sink_format, SinkFormat::Delimited);
        assert_eq!(config.weights.title, 0.7);
        assert!(config.validate().is_ok());
        // Unspecified sections fall back to defaults
        assert_eq!(config.service.port, 4450);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("NEWS_API_KEY", "env-key");
        std::env::set_var("PULSE_NEWS_PORT", "9999");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.news.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.service.port, 9999);
        assert!(config.validate().is_ok());

        std::env::remove_var("NEWS_API_KEY");
        std::env::remove_var("PULSE_NEWS_PORT");
    }

    #[test]
    fn test_load_from_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
