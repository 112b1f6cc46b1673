use std::collections::BTreeMap;

use crate::core::language::LanguageCatalog;

/// Validate the engine timeout
///
/// A zero timeout would fail every request, so it is rejected at startup.
pub fn validate_timeout(timeout_seconds: u64) -> Result<(), Box<dyn std::error::Error>> {
    if timeout_seconds == 0 {
        return Err("TTS_ENGINE_TIMEOUT_SECONDS must be greater than 0".into());
    }
    Ok(())
}

/// Validate the engine base URL, when one is configured
pub fn validate_engine_url(engine_url: &Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(url) = engine_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(format!("TTS_ENGINE_URL must start with http:// or https://: {url}").into());
    }
    Ok(())
}

/// Validate language settings against the built-in catalog
///
/// Ensures that:
/// - the default tag is not blank
/// - every configured alias targets a supported code
/// - the fallback is a supported code
pub fn validate_languages(
    default_language: &str,
    fallback_language: &str,
    aliases: &BTreeMap<String, String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if default_language.trim().is_empty() {
        return Err("DEFAULT_LANGUAGE cannot be empty".into());
    }

    let catalog = LanguageCatalog::builtin();

    for (tag, code) in aliases {
        if tag.trim().is_empty() {
            return Err("Language alias tags cannot be empty".into());
        }
        if !catalog.is_supported(code.trim()) {
            return Err(format!("Language alias '{tag}' points to unsupported code '{code}'").into());
        }
    }

    if !catalog.is_supported(fallback_language.trim()) {
        return Err(format!(
            "FALLBACK_LANGUAGE '{fallback_language}' is not a supported language code"
        )
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_timeout() {
        assert!(validate_timeout(15).is_ok());
        assert!(
            validate_timeout(0)
                .unwrap_err()
                .to_string()
                .contains("greater than 0")
        );
    }

    #[test]
    fn test_validate_engine_url() {
        assert!(validate_engine_url(&None).is_ok());
        assert!(validate_engine_url(&Some("https://proxy.example.com".to_string())).is_ok());
        assert!(validate_engine_url(&Some("ftp://proxy".to_string())).is_err());
    }

    #[test]
    fn test_validate_languages_ok() {
        let mut aliases = BTreeMap::new();
        aliases.insert("kannada-in".to_string(), "kn".to_string());
        assert!(validate_languages("en-US", "en", &aliases).is_ok());
    }

    #[test]
    fn test_validate_languages_unsupported_fallback() {
        let err = validate_languages("en", "xx", &BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("FALLBACK_LANGUAGE 'xx'"));
    }

    #[test]
    fn test_validate_languages_bad_alias_target() {
        let mut aliases = BTreeMap::new();
        aliases.insert("klingon".to_string(), "tlh".to_string());
        let err = validate_languages("en", "en", &aliases).unwrap_err();
        assert!(err.to_string().contains("unsupported code 'tlh'"));
    }

    #[test]
    fn test_validate_languages_blank_default() {
        assert!(validate_languages("  ", "en", &BTreeMap::new()).is_err());
    }
}
