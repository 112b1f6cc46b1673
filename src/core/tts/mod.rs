//! Text-to-speech: the engine abstraction, the Google Translate engine, and the
//! gateway that wraps engine calls.

mod base;
pub mod chunker;
mod gateway;
pub mod google;

pub use base::{AUDIO_MPEG, EngineError, SpeechEngine, SynthesisError, SynthesisResult};
pub use gateway::SynthesisGateway;
pub use google::GoogleTranslateEngine;
