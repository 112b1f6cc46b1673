use super::ServerConfig;
use super::env::EnvConfig;
use super::utils::non_blank;
use super::validation::{validate_engine_url, validate_languages, validate_timeout};
use super::yaml::YamlConfig;
use crate::core::DeliveryMode;

pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";
pub(crate) const DEFAULT_PORT: u16 = 5000;
pub(crate) const DEFAULT_LANGUAGE: &str = "en";
pub(crate) const DEFAULT_FALLBACK: &str = "en";
pub(crate) const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

/// Merge environment values, YAML values and defaults into a validated config
///
/// Priority order (highest to lowest):
/// 1. Environment variables
/// 2. YAML configuration values
/// 3. Default values
pub fn merge_config(
    env: EnvConfig,
    yaml_config: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let yaml = yaml_config.unwrap_or_default();
    let server = yaml.server.unwrap_or_default();
    let languages = yaml.languages.unwrap_or_default();
    let tts = yaml.tts.unwrap_or_default();

    let host = env
        .host
        .or(non_blank(server.host))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = env.port.or(server.port).unwrap_or(DEFAULT_PORT);
    let cors_enabled = env.cors_enabled.or(server.cors_enabled).unwrap_or(true);

    let default_language = env
        .default_language
        .or(non_blank(languages.default_tag))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let fallback_language = env
        .fallback_language
        .or(non_blank(languages.fallback_code))
        .unwrap_or_else(|| DEFAULT_FALLBACK.to_string());
    let language_aliases = languages.aliases;

    let delivery_mode = match env.delivery_mode.or(non_blank(tts.delivery_mode)) {
        Some(mode) => mode
            .parse::<DeliveryMode>()
            .map_err(|e| format!("Invalid TTS_DELIVERY_MODE: {e}"))?,
        None => DeliveryMode::default(),
    };
    let engine_url = env.engine_url.or(non_blank(tts.engine_url));
    let engine_timeout_seconds = env
        .engine_timeout_seconds
        .or(tts.timeout_seconds)
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);
    let temp_dir = env.temp_dir.or(tts.temp_dir);

    validate_timeout(engine_timeout_seconds)?;
    validate_engine_url(&engine_url)?;
    validate_languages(&default_language, &fallback_language, &language_aliases)?;

    Ok(ServerConfig {
        host,
        port,
        cors_enabled,
        default_language,
        fallback_language,
        language_aliases,
        delivery_mode,
        engine_url,
        engine_timeout_seconds,
        temp_dir,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;
    use crate::config::yaml::{LanguagesYaml, ServerYaml, TtsYaml};

    fn yaml() -> YamlConfig {
        let mut aliases = BTreeMap::new();
        aliases.insert("kannada-in".to_string(), "kn".to_string());
        YamlConfig {
            server: Some(ServerYaml {
                host: Some("127.0.0.1".to_string()),
                port: Some(8080),
                cors_enabled: Some(false),
            }),
            languages: Some(LanguagesYaml {
                default_tag: Some("hi-IN".to_string()),
                fallback_code: Some("hi".to_string()),
                aliases,
            }),
            tts: Some(TtsYaml {
                delivery_mode: Some("json-envelope".to_string()),
                engine_url: Some("http://yaml-engine".to_string()),
                timeout_seconds: Some(20),
                temp_dir: Some(PathBuf::from("/tmp/yaml")),
            }),
        }
    }

    #[test]
    fn test_merge_defaults_only() {
        let config = merge_config(EnvConfig::default(), None).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.cors_enabled);
        assert_eq!(config.delivery_mode, DeliveryMode::DirectBytes);
        assert_eq!(config.engine_timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert!(config.language_aliases.is_empty());
    }

    #[test]
    fn test_merge_yaml_over_defaults() {
        let config = merge_config(EnvConfig::default(), Some(yaml())).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(!config.cors_enabled);
        assert_eq!(config.default_language, "hi-IN");
        assert_eq!(config.fallback_language, "hi");
        assert_eq!(config.delivery_mode, DeliveryMode::JsonEnvelope);
        assert_eq!(config.engine_url, Some("http://yaml-engine".to_string()));
        assert_eq!(config.engine_timeout_seconds, 20);
        assert_eq!(config.temp_dir, Some(PathBuf::from("/tmp/yaml")));
        assert_eq!(config.language_aliases.get("kannada-in"), Some(&"kn".to_string()));
    }

    #[test]
    fn test_merge_env_over_yaml() {
        let env = EnvConfig {
            port: Some(9999),
            cors_enabled: Some(true),
            delivery_mode: Some("file-backed".to_string()),
            engine_timeout_seconds: Some(5),
            fallback_language: Some("en".to_string()),
            ..Default::default()
        };
        let config = merge_config(env, Some(yaml())).unwrap();
        assert_eq!(config.port, 9999);
        assert!(config.cors_enabled);
        assert_eq!(config.delivery_mode, DeliveryMode::FileBacked);
        assert_eq!(config.engine_timeout_seconds, 5);
        assert_eq!(config.fallback_language, "en");
        // Untouched keys keep their YAML values
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.default_language, "hi-IN");
    }

    #[test]
    fn test_merge_rejects_unknown_delivery_mode() {
        let env = EnvConfig {
            delivery_mode: Some("pigeon".to_string()),
            ..Default::default()
        };
        let err = merge_config(env, None).unwrap_err();
        assert!(err.to_string().contains("Invalid TTS_DELIVERY_MODE"));
    }

    #[test]
    fn test_merge_rejects_zero_timeout() {
        let env = EnvConfig {
            engine_timeout_seconds: Some(0),
            ..Default::default()
        };
        assert!(merge_config(env, None).is_err());
    }

    #[test]
    fn test_merge_rejects_unsupported_fallback() {
        let env = EnvConfig {
            fallback_language: Some("xx".to_string()),
            ..Default::default()
        };
        assert!(merge_config(env, None).is_err());
    }
}
