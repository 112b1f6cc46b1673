//! Configuration module for the speechgate server
//!
//! This module handles server configuration from various sources: YAML files and
//! environment variables. Environment variables always override YAML values.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging environment, YAML and default values
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use speechgate::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::DeliveryMode;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub use utils::parse_bool;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,

    // Language settings
    /// Tag used when a request carries no language
    pub default_language: String,
    /// Supported code returned for unresolvable tags
    pub fallback_language: String,
    /// Extra tag -> code aliases layered over the built-in catalog
    pub language_aliases: BTreeMap<String, String>,

    // Synthesis settings
    /// Delivery mode of `POST /tts`
    pub delivery_mode: DeliveryMode,
    /// Engine base URL override; `None` uses the public endpoint
    pub engine_url: Option<String>,
    pub engine_timeout_seconds: u64,
    /// Directory for file-backed delivery; `None` uses the OS temp dir
    pub temp_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: merge::DEFAULT_HOST.to_string(),
            port: merge::DEFAULT_PORT,
            cors_enabled: true,
            default_language: merge::DEFAULT_LANGUAGE.to_string(),
            fallback_language: merge::DEFAULT_FALLBACK.to_string(),
            language_aliases: BTreeMap::new(),
            delivery_mode: DeliveryMode::default(),
            engine_url: None,
            engine_timeout_seconds: merge::DEFAULT_TIMEOUT_SECONDS,
            temp_dir: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable overrides
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables
    /// 2. YAML file values
    /// 3. Default values
    ///
    /// The `.env` file is not read here: the YAML file is the source of truth
    /// and only real environment variables override it.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        merge::merge_config(env::EnvConfig::load()?, Some(yaml_config))
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_seconds)
    }
}
