use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};

use super::base::{AUDIO_MPEG, SpeechEngine, SynthesisError, SynthesisResult};
use crate::core::language::NormalizedCode;

/// Boundary around the external speech engine.
///
/// Calls the engine exactly once per request (no retries), bounds the call with
/// a timeout, and turns every engine failure into a [`SynthesisError`].
#[derive(Clone)]
pub struct SynthesisGateway {
    engine: Arc<dyn SpeechEngine>,
    timeout: Duration,
}

impl SynthesisGateway {
    pub fn new(engine: Arc<dyn SpeechEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn synthesize(
        &self,
        text: &str,
        code: &NormalizedCode,
    ) -> Result<SynthesisResult, SynthesisError> {
        let started = Instant::now();

        let outcome = tokio::time::timeout(self.timeout, self.engine.synthesize(text, code)).await;
        let elapsed = started.elapsed();

        let bytes = match outcome {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                error!(engine = self.engine.name(), code = %code, "Speech synthesis failed: {e}");
                return Err(e.into());
            }
            Err(_) => {
                error!(
                    engine = self.engine.name(),
                    code = %code,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Speech synthesis timed out"
                );
                return Err(SynthesisError::new(format!(
                    "Speech synthesis timed out after {}s",
                    self.timeout.as_secs_f64()
                )));
            }
        };

        info!(
            engine = self.engine.name(),
            code = %code,
            bytes = bytes.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Speech synthesized"
        );

        Ok(SynthesisResult {
            bytes,
            mime_type: AUDIO_MPEG,
            code_used: code.clone(),
            elapsed,
        })
    }
}
