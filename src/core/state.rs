use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::language::{CatalogError, LanguageCatalog, LanguageResolver};
use crate::core::request::RequestValidator;
use crate::core::service::SpeechService;
use crate::core::temp_audio::{ResourceError, TempAudioStore};
use crate::core::tts::{EngineError, GoogleTranslateEngine, SpeechEngine, SynthesisGateway};

/// Startup failures; the server never starts with a partial core
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Invalid language catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to initialize speech engine: {0}")]
    Engine(#[from] EngineError),

    #[error("Failed to prepare temporary directory: {0}")]
    Resource(#[from] ResourceError),
}

/// Core-specific shared state for the application.
///
/// Built once before the listener accepts traffic. The catalog is immutable
/// afterwards; everything else is stateless per request apart from the temp
/// store's counters.
#[derive(Clone)]
pub struct CoreState {
    pub catalog: Arc<LanguageCatalog>,
    pub service: SpeechService,
    pub temp_store: TempAudioStore,
}

impl CoreState {
    /// Initialize core state with the Google Translate engine
    pub fn new(config: &ServerConfig) -> Result<Arc<Self>, InitError> {
        let catalog = Arc::new(build_catalog(config)?);
        let engine = GoogleTranslateEngine::new(catalog.clone(), config.engine_url.clone())?;
        Self::assemble(config, catalog, Arc::new(engine))
    }

    /// Initialize core state around a caller-supplied engine
    pub fn with_engine(
        config: &ServerConfig,
        engine: Arc<dyn SpeechEngine>,
    ) -> Result<Arc<Self>, InitError> {
        let catalog = Arc::new(build_catalog(config)?);
        Self::assemble(config, catalog, engine)
    }

    fn assemble(
        config: &ServerConfig,
        catalog: Arc<LanguageCatalog>,
        engine: Arc<dyn SpeechEngine>,
    ) -> Result<Arc<Self>, InitError> {
        let resolver = LanguageResolver::new(catalog.clone(), &config.fallback_language)?;
        let gateway = SynthesisGateway::new(engine, config.engine_timeout());
        let validator = RequestValidator::new(config.default_language.clone());
        let temp_store = TempAudioStore::new(config.temp_dir.clone())?;

        info!(
            engine = gateway.engine_name(),
            catalog_version = catalog.version(),
            languages = catalog.len(),
            fallback = %resolver.fallback(),
            temp_dir = %temp_store.dir().display(),
            "Core state initialized"
        );

        Ok(Arc::new(Self {
            catalog,
            service: SpeechService::new(validator, resolver, gateway),
            temp_store,
        }))
    }
}

/// Built-in catalog with configured aliases layered on top
fn build_catalog(config: &ServerConfig) -> Result<LanguageCatalog, CatalogError> {
    let builtin = LanguageCatalog::builtin();
    if config.language_aliases.is_empty() {
        return Ok(builtin.clone());
    }

    let mut builder = builtin.to_builder();
    for (tag, code) in &config.language_aliases {
        builder = builder.alias(tag.trim(), code.trim());
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::language::LanguageTag;

    #[test]
    fn test_builtin_catalog_without_aliases() {
        let catalog = build_catalog(&ServerConfig::default()).unwrap();
        assert_eq!(&catalog, LanguageCatalog::builtin());
    }

    #[test]
    fn test_configured_alias_is_layered() {
        let mut aliases = BTreeMap::new();
        aliases.insert("Kannada-IN".to_string(), "kn".to_string());
        let config = ServerConfig {
            language_aliases: aliases,
            ..Default::default()
        };

        let state = CoreState::new(&config).unwrap();
        let code = state
            .service
            .resolver()
            .resolve(&LanguageTag::new("kannada-in"));
        assert_eq!(code, "kn");
        // Built-in entries survive
        assert!(state.catalog.is_supported("zh-TW"));
    }

    #[test]
    fn test_unsupported_fallback_fails_init() {
        let config = ServerConfig {
            fallback_language: "xx".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            CoreState::new(&config),
            Err(InitError::Catalog(CatalogError::UnsupportedFallback(_)))
        ));
    }
}
