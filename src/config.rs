//! Configuration types for quickbet

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8787
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Page fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Timeout for the whole page request (seconds)
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// User agent sent with page requests; some sites block bot agents
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Bytes of markup kept for meta tag scanning
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_fetch_timeout() -> u64 {
    10
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36"
        .to_string()
}
fn default_max_body_bytes() -> usize {
    2_000_000
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Language model gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible gateway
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Explicit API key; takes precedence over `api_key_env`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key, read on every request
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model used for the market question
    #[serde(default = "default_completion_model")]
    pub completion_model: String,

    /// Model used for hero images and icons
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Timeout for each gateway call (seconds)
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,

    /// Request a topic icon alongside the hero image
    #[serde(default = "default_true")]
    pub generate_icon: bool,
}

fn default_llm_base_url() -> String {
    "https://ai.gateway.lovable.dev/v1".to_string()
}
fn default_api_key_env() -> String {
    "LOVABLE_API_KEY".to_string()
}
fn default_completion_model() -> String {
    "google/gemini-2.5-flash".to_string()
}
fn default_image_model() -> String {
    "google/gemini-2.5-flash-image-preview".to_string()
}
fn default_llm_timeout() -> u64 {
    60
}
fn default_true() -> bool {
    true
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            completion_model: default_completion_model(),
            image_model: default_image_model(),
            timeout_secs: default_llm_timeout(),
            generate_icon: true,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Local market book configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./quickbet_markets.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Prometheus listener port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_port: None,
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
