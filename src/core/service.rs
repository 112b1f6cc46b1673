//! Transport-agnostic synthesis pipeline: validate, resolve, synthesize.
//!
//! HTTP handlers call [`SpeechService::speak`] and only translate wire shapes
//! in and out; delivery happens afterwards on the returned [`SpeechOutcome`].

use std::sync::Arc;

use tracing::info;

use super::language::{LanguageCatalog, LanguageResolver, Resolution};
use super::request::{RequestValidator, SpeakRequest, SynthesisRequest, ValidationError};
use super::tts::{SynthesisError, SynthesisGateway, SynthesisResult};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// Everything a dispatcher needs to answer one request
#[derive(Debug, Clone)]
pub struct SpeechOutcome {
    pub request: SynthesisRequest,
    pub resolution: Resolution,
    pub result: SynthesisResult,
    /// Display name of the voice for the resolved code
    pub voice: String,
}

#[derive(Clone)]
pub struct SpeechService {
    validator: RequestValidator,
    resolver: LanguageResolver,
    gateway: SynthesisGateway,
}

impl SpeechService {
    pub fn new(
        validator: RequestValidator,
        resolver: LanguageResolver,
        gateway: SynthesisGateway,
    ) -> Self {
        Self {
            validator,
            resolver,
            gateway,
        }
    }

    pub fn catalog(&self) -> &Arc<LanguageCatalog> {
        self.resolver.catalog()
    }

    pub fn resolver(&self) -> &LanguageResolver {
        &self.resolver
    }

    pub fn validator(&self) -> &RequestValidator {
        &self.validator
    }

    pub fn gateway(&self) -> &SynthesisGateway {
        &self.gateway
    }

    /// Validation failures return before the engine is called.
    pub async fn speak(&self, raw: SpeakRequest) -> Result<SpeechOutcome, ServiceError> {
        let request = self.validator.validate(raw)?;
        let resolution = self.resolver.resolve_detailed(&request.tag);

        info!(
            tag = %request.tag,
            code = %resolution.code,
            matched = %resolution.matched,
            chars = request.text.chars().count(),
            "Synthesizing speech"
        );

        let result = self.gateway.synthesize(&request.text, &resolution.code).await?;

        let voice = self
            .catalog()
            .voice(&resolution.code)
            .map(|profile| profile.name.clone())
            .unwrap_or_else(|| resolution.code.to_string());

        Ok(SpeechOutcome {
            request,
            resolution,
            result,
            voice,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::core::language::{MatchKind, NormalizedCode};
    use crate::core::tts::{EngineError, SpeechEngine};

    #[derive(Default)]
    struct RecordingEngine {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl SpeechEngine for RecordingEngine {
        fn name(&self) -> &str {
            "recording"
        }

        async fn synthesize(&self, text: &str, code: &NormalizedCode) -> Result<Bytes, EngineError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), code.to_string()));
            if self.fail {
                Err(EngineError::Status {
                    status: 429,
                    body: "quota".to_string(),
                })
            } else {
                Ok(Bytes::from_static(b"ID3"))
            }
        }
    }

    fn service(engine: Arc<RecordingEngine>) -> SpeechService {
        let catalog = Arc::new(LanguageCatalog::builtin().clone());
        SpeechService::new(
            RequestValidator::new("en"),
            LanguageResolver::new(catalog, "en").unwrap(),
            SynthesisGateway::new(engine, Duration::from_secs(5)),
        )
    }

    fn raw(text: &str, language: Option<&str>) -> SpeakRequest {
        SpeakRequest {
            text: Some(text.to_string()),
            language: language.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_region_tag_resolves_before_engine_call() {
        let engine = Arc::new(RecordingEngine::default());
        let outcome = service(engine.clone())
            .speak(raw("Hello", Some("kn-IN")))
            .await
            .unwrap();

        assert_eq!(outcome.result.code_used, "kn");
        assert_eq!(outcome.voice, "Kannada (Google)");
        assert_eq!(outcome.request.tag.as_str(), "kn-IN");
        assert_eq!(
            *engine.calls.lock().unwrap(),
            vec![("Hello".to_string(), "kn".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unknown_tag_falls_back() {
        let engine = Arc::new(RecordingEngine::default());
        let outcome = service(engine.clone())
            .speak(raw("Bonjour", Some("xx-YY")))
            .await
            .unwrap();

        assert_eq!(outcome.resolution.matched, MatchKind::Fallback);
        assert_eq!(
            *engine.calls.lock().unwrap(),
            vec![("Bonjour".to_string(), "en".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_engine() {
        let engine = Arc::new(RecordingEngine::default());
        let err = service(engine.clone())
            .speak(raw("   ", Some("hi")))
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::Validation(ValidationError::EmptyText));
        assert!(engine.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_engine_failure_becomes_synthesis_error() {
        let engine = Arc::new(RecordingEngine {
            fail: true,
            ..Default::default()
        });
        let err = service(engine).speak(raw("Hi", None)).await.unwrap_err();

        match err {
            ServiceError::Synthesis(e) => {
                assert_eq!(e.message, "Speech engine returned status 429: quota")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
