use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::providers::imdb::DEFAULT_IMDB_ENDPOINT;
use crate::providers::omdb::DEFAULT_OMDB_ENDPOINT;
use crate::resolution::DEFAULT_SIMILARITY_THRESHOLD;

/// Application configuration module
/// This module handles loading, validating and writing the configuration
/// file holding service credentials and tuning knobs.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Session cookie of a logged-in IMDb browser session
    #[serde(default)]
    pub imdb_cookie: String,

    /// OMDb API key
    #[serde(default)]
    pub omdb_api_key: String,

    /// Language of failure explanations
    #[serde(default)]
    pub locale: Locale,

    /// OMDb endpoint URL
    #[serde(default = "default_omdb_endpoint")]
    pub omdb_endpoint: String,

    /// IMDb GraphQL endpoint URL
    #[serde(default = "default_imdb_endpoint")]
    pub imdb_endpoint: String,

    /// Request timeout in seconds, applied to both services
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum similarity a transliterated match needs to be accepted (0.0 to 1.0)
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Supported message locales
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    // @returns: Lowercase locale identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            _ => Err(anyhow!("invalid locale '{}': should be either 'en' or 'ru'", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_omdb_endpoint() -> String {
    DEFAULT_OMDB_ENDPOINT.to_string()
}

fn default_imdb_endpoint() -> String {
    DEFAULT_IMDB_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

impl Config {
    /// Read and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()
            .context("Configuration validation failed")?;

        Ok(config)
    }

    /// Write a template configuration; refuses to replace an existing file
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if path.exists() {
            return Err(anyhow!("Config file already exists: {:?}", path));
        }

        let config_json = serde_json::to_string_pretty(&Config::default())
            .context("Failed to serialize default config to JSON")?;

        FileManager::write_to_file(path, &config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.omdb_api_key.trim().is_empty() {
            return Err(anyhow!("OMDb API Key not set"));
        }
        if self.imdb_cookie.trim().is_empty() {
            return Err(anyhow!("IMDb Cookie not set"));
        }

        url::Url::parse(&self.omdb_endpoint)
            .with_context(|| format!("Invalid OMDb endpoint: {}", self.omdb_endpoint))?;
        url::Url::parse(&self.imdb_endpoint)
            .with_context(|| format!("Invalid IMDb endpoint: {}", self.imdb_endpoint))?;

        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(anyhow!(
                "similarity_threshold must be between 0.0 and 1.0, got {}",
                self.similarity_threshold
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            imdb_cookie: String::new(),
            omdb_api_key: String::new(),
            locale: Locale::default(),
            omdb_endpoint: default_omdb_endpoint(),
            imdb_endpoint: default_imdb_endpoint(),
            timeout_secs: default_timeout_secs(),
            similarity_threshold: default_similarity_threshold(),
            log_level: LogLevel::default(),
        }
    }
}
