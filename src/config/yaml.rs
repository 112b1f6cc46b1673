use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Environment
/// variables override any values specified here.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 5000
///   cors_enabled: true
///
/// languages:
///   default_tag: "en-US"
///   fallback_code: "en"
///   aliases:
///     kannada-in: "kn"
///     en-AU: "en"
///
/// tts:
///   delivery_mode: "file-backed"
///   engine_url: "http://localhost:9000"
///   timeout_seconds: 15
///   temp_dir: "/var/tmp/speechgate"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub languages: Option<LanguagesYaml>,
    pub tts: Option<TtsYaml>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LanguagesYaml {
    /// Tag used when a request carries no language
    pub default_tag: Option<String>,
    /// Code returned for tags that resolve to nothing
    pub fallback_code: Option<String>,
    /// Extra tag -> code entries layered over the built-in catalog
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TtsYaml {
    pub delivery_mode: Option<String>,
    pub engine_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub temp_dir: Option<PathBuf>,
}

impl YamlConfig {
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
