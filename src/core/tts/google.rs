//! # Google Translate speech engine
//!
//! Uses the public `translate_tts` endpoint (the same backend gTTS talks to).
//! The endpoint accepts at most [`MAX_CHUNK_CHARS`] characters per request, so
//! longer text is split by [`split_text`] and the MP3 responses are concatenated
//! in order. MP3 frames are self-delimiting, so the concatenation plays as one
//! stream.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use speechgate::core::language::{LanguageCatalog, LanguageResolver, LanguageTag};
//! use speechgate::core::tts::{GoogleTranslateEngine, SpeechEngine};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(LanguageCatalog::builtin().clone());
//! let resolver = LanguageResolver::new(catalog.clone(), "en")?;
//! let engine = GoogleTranslateEngine::new(catalog, None)?;
//!
//! let code = resolver.resolve(&LanguageTag::new("hi-IN"));
//! let mp3 = engine.synthesize("नमस्ते", &code).await?;
//! println!("{} bytes", mp3.len());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::header::{ACCEPT, REFERER, USER_AGENT};
use tracing::debug;

use super::base::{EngineError, SpeechEngine};
use super::chunker::{MAX_CHUNK_CHARS, split_text};
use crate::core::language::{LanguageCatalog, NormalizedCode};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_TLD: &str = "com";

/// Speech engine backed by Google Translate's text-to-speech endpoint
pub struct GoogleTranslateEngine {
    client: reqwest::Client,
    catalog: Arc<LanguageCatalog>,
    /// Overrides `https://translate.google.<tld>` when set
    base_url: Option<String>,
}

impl GoogleTranslateEngine {
    /// `catalog` supplies the regional TLD per code; `base_url` replaces the
    /// Google host entirely (proxies, tests).
    pub fn new(
        catalog: Arc<LanguageCatalog>,
        base_url: Option<String>,
    ) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| {
                EngineError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_client(client, catalog, base_url))
    }

    pub fn with_client(
        client: reqwest::Client,
        catalog: Arc<LanguageCatalog>,
        base_url: Option<String>,
    ) -> Self {
        Self {
            client,
            catalog,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    fn endpoint(&self, code: &NormalizedCode) -> String {
        match &self.base_url {
            Some(base) => format!("{base}/translate_tts"),
            None => {
                let tld = self
                    .catalog
                    .voice(code)
                    .map(|voice| voice.tld.as_str())
                    .unwrap_or(DEFAULT_TLD);
                format!("https://translate.google.{tld}/translate_tts")
            }
        }
    }

    async fn fetch_chunk(
        &self,
        endpoint: &str,
        chunk: &str,
        code: &NormalizedCode,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, EngineError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", code.as_str()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
                ("ttsspeed", "1"),
            ])
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, "https://translate.google.com/")
            .header(ACCEPT, "audio/mpeg")
            .send()
            .await
            .map_err(|e| EngineError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| EngineError::Request(e.to_string()))?;
        if audio.is_empty() {
            return Err(EngineError::EmptyAudio);
        }

        Ok(audio)
    }
}

#[async_trait]
impl SpeechEngine for GoogleTranslateEngine {
    fn name(&self) -> &str {
        "google-translate"
    }

    async fn synthesize(&self, text: &str, code: &NormalizedCode) -> Result<Bytes, EngineError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(EngineError::Request("No text to speak".to_string()));
        }

        let endpoint = self.endpoint(code);
        let total = chunks.len();
        let mut audio = BytesMut::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            debug!(code = %code, idx, total, chars = chunk.chars().count(), "Fetching speech chunk");
            let part = self.fetch_chunk(&endpoint, chunk, code, idx, total).await?;
            audio.extend_from_slice(&part);
        }

        Ok(audio.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<LanguageCatalog> {
        Arc::new(LanguageCatalog::builtin().clone())
    }

    #[test]
    fn test_endpoint_uses_language_tld() {
        let catalog = catalog();
        let engine = GoogleTranslateEngine::new(catalog.clone(), None).unwrap();

        let hi = catalog.supported_code("hi").unwrap();
        assert_eq!(
            engine.endpoint(&hi),
            "https://translate.google.co.in/translate_tts"
        );

        let fr = catalog.supported_code("fr").unwrap();
        assert_eq!(
            engine.endpoint(&fr),
            "https://translate.google.com/translate_tts"
        );
    }

    #[test]
    fn test_base_url_override_wins() {
        let catalog = catalog();
        let engine =
            GoogleTranslateEngine::new(catalog.clone(), Some("http://127.0.0.1:9999/".to_string()))
                .unwrap();
        let hi = catalog.supported_code("hi").unwrap();
        assert_eq!(engine.endpoint(&hi), "http://127.0.0.1:9999/translate_tts");
    }

    #[tokio::test]
    async fn test_punctuation_only_text_is_rejected_without_request() {
        let catalog = catalog();
        // Unroutable base URL: reaching the network would fail differently.
        let engine =
            GoogleTranslateEngine::new(catalog.clone(), Some("http://0.0.0.0:1".to_string()))
                .unwrap();
        let en = catalog.supported_code("en").unwrap();
        let err = engine.synthesize("?!...", &en).await.unwrap_err();
        assert!(matches!(err, EngineError::Request(msg) if msg == "No text to speak"));
    }
}
