use crate::error::{Result, TftError};
use crate::rate_limit::types::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder substituted with the routing domain in `ApiConfig::base_url`
pub const ROUTING_PLACEHOLDER: &str = "{routing}";

/// Main client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API endpoint configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Rate limits of the API key
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Where to load the API key from
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL template, `{routing}` is replaced by the routing domain
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Header carrying the API key
    #[serde(default = "default_key_header")]
    pub key_header: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Source of the API key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    Env,
    File,
}

/// Credentials configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default = "default_key_source")]
    pub source: KeySource,
    /// Environment variable holding the key
    #[serde(default = "default_env_var")]
    pub env_var: String,
    /// File holding the key
    #[serde(default = "default_key_path")]
    pub path: PathBuf,
}

fn default_base_url() -> String {
    "https://{routing}.api.riotgames.com".to_string()
}

fn default_key_header() -> String {
    "X-Riot-Token".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_key_source() -> KeySource {
    KeySource::Env
}

fn default_env_var() -> String {
    "RIOT_API_KEY".to_string()
}

fn default_key_path() -> PathBuf {
    PathBuf::from("./apikey")
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key_header: default_key_header(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            source: default_key_source(),
            env_var: default_env_var(),
            path: default_key_path(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TftError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| TftError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(TftError::Config(format!(
                "Base URL must start with http:// or https://: {}",
                base_url
            )));
        }
        if !base_url.contains(ROUTING_PLACEHOLDER) {
            return Err(TftError::Config(format!(
                "Base URL must contain {}: {}",
                ROUTING_PLACEHOLDER, base_url
            )));
        }

        if self.api.key_header.trim().is_empty() {
            return Err(TftError::Config("API key header cannot be empty".to_string()));
        }

        if self.api.timeout_secs == 0 {
            return Err(TftError::Config("Request timeout must be > 0".to_string()));
        }

        self.rate_limit.validate()
    }
}
