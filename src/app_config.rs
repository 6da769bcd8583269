use anyhow::{anyhow, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language key of the original text in stored sentences
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language key of the reviewed translation in stored sentences
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Document store connection
    #[serde(default)]
    pub store: StoreConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Document store connection settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Cluster REST endpoint
    #[serde(default = "default_store_endpoint")]
    pub endpoint: String,

    /// Bucket holding translation documents
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// User name for basic auth (empty disables auth)
    #[serde(default = "String::new")]
    pub username: String,

    /// Password for basic auth
    #[serde(default = "String::new")]
    pub password: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_store_endpoint(),
            bucket: default_bucket(),
            username: String::new(),
            password: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "ja".to_string()
}

fn default_store_endpoint() -> String {
    "http://localhost:8091".to_string()
}

fn default_bucket() -> String {
    "translation".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load the configuration file, writing a default one if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path));
        }

        info!("Config file not found, creating default at {:?}", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        if crate::language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target languages must differ: {} / {}",
                self.source_language,
                self.target_language
            ));
        }

        self.store.validate()
    }
}

impl StoreConfig {
    /// Validate endpoint, bucket and timeout
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid store endpoint: {}", self.endpoint))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow!("Store endpoint must use http or https: {}", self.endpoint));
        }

        if self.bucket.trim().is_empty() {
            return Err(anyhow!("Store bucket name is required"));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("Store timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            store: StoreConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
