pub mod delivery;
pub mod language;
pub mod request;
pub mod service;
pub mod state;
pub mod temp_audio;
pub mod tts;

// Re-export commonly used types for convenience
pub use delivery::DeliveryMode;
pub use language::{LanguageCatalog, LanguageResolver, LanguageTag, NormalizedCode};
pub use request::{RequestValidator, SpeakRequest, SynthesisRequest, ValidationError};
pub use service::{ServiceError, SpeechOutcome, SpeechService};
pub use temp_audio::{ResourceError, ResourceStats, TempAudioFile, TempAudioStore};
pub use tts::{SpeechEngine, SynthesisError, SynthesisGateway, SynthesisResult};

pub use state::{CoreState, InitError};
