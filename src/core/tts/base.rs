//! # Speech engine abstraction
//!
//! The gateway treats acoustic synthesis as an opaque external capability:
//! `synthesize(text, code) -> audio bytes`. Engines implement [`SpeechEngine`]
//! and report failures through [`EngineError`]. Nothing outside the
//! [`SynthesisGateway`](super::SynthesisGateway) sees an `EngineError`; callers
//! only ever get a [`SynthesisError`].
//!
//! ## Implementing an engine
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use speechgate::core::language::NormalizedCode;
//! use speechgate::core::tts::{EngineError, SpeechEngine};
//!
//! struct Silence;
//!
//! #[async_trait]
//! impl SpeechEngine for Silence {
//!     fn name(&self) -> &str {
//!         "silence"
//!     }
//!
//!     async fn synthesize(&self, _text: &str, _code: &NormalizedCode) -> Result<Bytes, EngineError> {
//!         Ok(Bytes::from_static(&[0xFF, 0xFB, 0x90, 0x00]))
//!     }
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::core::language::NormalizedCode;

/// MIME type of everything the gateway delivers
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// Failures raised by a speech engine
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Request to speech engine failed: {0}")]
    Request(String),

    #[error("Speech engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Speech engine returned empty audio")]
    EmptyAudio,

    #[error("Invalid engine configuration: {0}")]
    InvalidConfiguration(String),
}

/// External voice-synthesis capability
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Synthesize `text` in `code`, returning a complete MP3 buffer
    async fn synthesize(&self, text: &str, code: &NormalizedCode) -> Result<Bytes, EngineError>;
}

/// Audio produced for one request
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub bytes: Bytes,
    pub mime_type: &'static str,
    pub code_used: NormalizedCode,
    /// Wall time spent inside the engine
    pub elapsed: Duration,
}

/// The single error shape the gateway exposes for engine failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SynthesisError {
    pub message: String,
}

impl SynthesisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<EngineError> for SynthesisError {
    fn from(err: EngineError) -> Self {
        Self::new(err.to_string())
    }
}
