use crate::config::{CredentialsConfig, KeySource};
use crate::error::{Result, TftError};
use secrecy::{ExposeSecret, Secret};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Secret string wrapper that prevents accidental exposure
pub type ApiKey = Secret<String>;

/// Source of the API key
pub trait KeyProvider {
    fn api_key(&self) -> Result<ApiKey>;
}

/// Reads the key from an environment variable
#[derive(Debug, Clone)]
pub struct EnvKeyProvider {
    var: String,
}

impl EnvKeyProvider {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl Default for EnvKeyProvider {
    fn default() -> Self {
        Self::new("RIOT_API_KEY")
    }
}

impl KeyProvider for EnvKeyProvider {
    fn api_key(&self) -> Result<ApiKey> {
        debug!(var = %self.var, "Reading API key from environment");
        let value = env::var(&self.var).map_err(|_| {
            TftError::Config(format!("Environment variable '{}' not set", self.var))
        })?;
        non_empty(value.trim().to_string(), &self.var)
    }
}

/// Reads the key from a file, ignoring surrounding whitespace
#[derive(Debug, Clone)]
pub struct FileKeyProvider {
    path: PathBuf,
}

impl FileKeyProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl KeyProvider for FileKeyProvider {
    fn api_key(&self) -> Result<ApiKey> {
        debug!(path = %self.path.display(), "Reading API key from file");
        let content = fs::read_to_string(&self.path).map_err(|e| {
            TftError::Config(format!(
                "Failed to read API key from {}: {}",
                self.path.display(),
                e
            ))
        })?;
        non_empty(content.trim().to_string(), &self.path.display().to_string())
    }
}

/// Fixed key, for tests or keys obtained elsewhere
#[derive(Debug)]
pub struct StaticKeyProvider {
    key: ApiKey,
}

impl StaticKeyProvider {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Secret::new(key.into()),
        }
    }
}

impl KeyProvider for StaticKeyProvider {
    fn api_key(&self) -> Result<ApiKey> {
        non_empty(self.key.expose_secret().clone(), "static key")
    }
}

fn non_empty(key: String, origin: &str) -> Result<ApiKey> {
    if key.is_empty() {
        return Err(TftError::Config(format!("API key from {} is empty", origin)));
    }
    Ok(Secret::new(key))
}

/// Resolve the API key as configured
pub fn load_api_key(config: &CredentialsConfig) -> Result<ApiKey> {
    match config.source {
        KeySource::Env => EnvKeyProvider::new(&config.env_var).api_key(),
        KeySource::File => FileKeyProvider::new(&config.path).api_key(),
    }
}
