use std::env;
use std::path::PathBuf;

use super::ServerConfig;
use super::merge::merge_config;
use super::utils::{non_blank, parse_bool};

/// Values read from environment variables; `None` means unset
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_enabled: Option<bool>,
    pub default_language: Option<String>,
    pub fallback_language: Option<String>,
    pub delivery_mode: Option<String>,
    pub engine_url: Option<String>,
    pub engine_timeout_seconds: Option<u64>,
    pub temp_dir: Option<PathBuf>,
}

impl EnvConfig {
    /// Read every supported variable. Malformed numbers and booleans are
    /// errors rather than silently ignored.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let var = |name: &str| non_blank(env::var(name).ok());

        let port = var("PORT")
            .map(|v| {
                v.parse::<u16>()
                    .map_err(|e| format!("Invalid PORT environment variable: {e}"))
            })
            .transpose()?;

        let engine_timeout_seconds = var("TTS_ENGINE_TIMEOUT_SECONDS")
            .map(|v| {
                v.parse::<u64>().map_err(|e| {
                    format!("Invalid TTS_ENGINE_TIMEOUT_SECONDS environment variable: {e}")
                })
            })
            .transpose()?;

        let cors_enabled = var("CORS_ENABLED")
            .map(|v| {
                parse_bool(&v)
                    .ok_or_else(|| format!("Invalid CORS_ENABLED environment variable: '{v}'"))
            })
            .transpose()?;

        Ok(Self {
            host: var("HOST"),
            port,
            cors_enabled,
            default_language: var("DEFAULT_LANGUAGE"),
            fallback_language: var("FALLBACK_LANGUAGE"),
            delivery_mode: var("TTS_DELIVERY_MODE"),
            engine_url: var("TTS_ENGINE_URL"),
            engine_timeout_seconds,
            temp_dir: var("TTS_TEMP_DIR").map(PathBuf::from),
        })
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Also loads from .env file if present using dotenvy.
    ///
    /// # Errors
    /// Returns an error if a variable is malformed or the resulting
    /// configuration fails validation.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        merge_config(EnvConfig::load()?, None)
    }
}
