use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::tts::SpeechEngine;
use crate::core::{CoreState, InitError, LanguageCatalog, SpeechService, TempAudioStore};

/// Application state that can be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Core layer state: catalog, synthesis pipeline and temp-file store
    pub core_state: Arc<CoreState>,
}

impl AppState {
    /// Build state around the default Google Translate engine
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, InitError> {
        let core_state = CoreState::new(&config)?;
        Ok(Arc::new(Self { config, core_state }))
    }

    /// Build state around a caller-supplied engine (tests, alternative backends)
    pub fn with_engine(
        config: ServerConfig,
        engine: Arc<dyn SpeechEngine>,
    ) -> Result<Arc<Self>, InitError> {
        let core_state = CoreState::with_engine(&config, engine)?;
        Ok(Arc::new(Self { config, core_state }))
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.core_state.catalog
    }

    pub fn service(&self) -> &SpeechService {
        &self.core_state.service
    }

    pub fn temp_store(&self) -> &TempAudioStore {
        &self.core_state.temp_store
    }
}
