//! Response dispatch for the three delivery modes.
//!
//! - `direct-bytes`: audio straight from memory with an exact `Content-Length`.
//! - `file-backed`: audio written to a [`TempAudioFile`] and streamed from disk.
//!   The file is owned by the response body, so it is released when the stream
//!   ends, fails, or is dropped because the client went away.
//! - `json-envelope`: base64 audio inside a JSON document.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    Json,
    body::Body,
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use futures::Stream;
use serde::Serialize;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

use crate::core::{DeliveryMode, SpeechOutcome, TempAudioFile, TempAudioStore};

pub const X_TTS_LANGUAGE: HeaderName = HeaderName::from_static("x-tts-language");
pub const X_TTS_DURATION: HeaderName = HeaderName::from_static("x-tts-duration");

/// JSON body of the `json-envelope` mode
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SpeechEnvelope {
    pub success: bool,
    /// Base64 (standard alphabet) MP3 audio
    pub audio: String,
    /// Voice display name
    #[cfg_attr(feature = "openapi", schema(example = "Kannada (Google)"))]
    pub voice: String,
    /// Language tag as requested (or the default tag)
    #[cfg_attr(feature = "openapi", schema(example = "kn-IN"))]
    pub language: String,
    /// Engine code the tag resolved to
    #[cfg_attr(feature = "openapi", schema(example = "kn"))]
    pub code: String,
    /// Trimmed text that was synthesized
    pub text: String,
}

impl SpeechEnvelope {
    pub fn from_outcome(outcome: &SpeechOutcome) -> Self {
        Self {
            success: true,
            audio: STANDARD.encode(&outcome.result.bytes),
            voice: outcome.voice.clone(),
            language: outcome.request.tag.to_string(),
            code: outcome.result.code_used.to_string(),
            text: outcome.request.text.clone(),
        }
    }
}

/// Turn a successful synthesis into the wire response for `mode`
pub async fn dispatch(outcome: SpeechOutcome, mode: DeliveryMode, store: &TempAudioStore) -> Response {
    match mode {
        DeliveryMode::DirectBytes => direct_bytes(outcome),
        DeliveryMode::FileBacked => file_backed(outcome, store).await,
        DeliveryMode::JsonEnvelope => json_envelope(&outcome),
    }
}

fn audio_headers(outcome: &SpeechOutcome, content_length: u64) -> [(HeaderName, String); 4] {
    [
        (header::CONTENT_TYPE, outcome.result.mime_type.to_string()),
        (header::CONTENT_LENGTH, content_length.to_string()),
        (X_TTS_LANGUAGE, outcome.result.code_used.to_string()),
        (
            X_TTS_DURATION,
            outcome.result.elapsed.as_millis().to_string(),
        ),
    ]
}

fn direct_bytes(outcome: SpeechOutcome) -> Response {
    let headers = audio_headers(&outcome, outcome.result.bytes.len() as u64);
    (StatusCode::OK, headers, Body::from(outcome.result.bytes)).into_response()
}

fn json_envelope(outcome: &SpeechOutcome) -> Response {
    (StatusCode::OK, Json(SpeechEnvelope::from_outcome(outcome))).into_response()
}

async fn file_backed(outcome: SpeechOutcome, store: &TempAudioStore) -> Response {
    let temp_file = match store.persist(outcome.result.bytes.clone()).await {
        Ok(file) => file,
        Err(e) => {
            warn!("{e}; answering from memory instead");
            return direct_bytes(outcome);
        }
    };

    let reader = match tokio::fs::File::open(temp_file.path()).await {
        Ok(reader) => reader,
        Err(e) => {
            warn!(
                path = %temp_file.path().display(),
                "Failed to open temporary audio file: {e}; answering from memory instead"
            );
            // temp_file is dropped (and released) here
            return direct_bytes(outcome);
        }
    };

    debug!(path = %temp_file.path().display(), bytes = temp_file.len(), "Streaming audio from file");
    let headers = audio_headers(&outcome, temp_file.len());
    let body = Body::from_stream(TempFileStream::new(reader, temp_file));
    (StatusCode::OK, headers, body).into_response()
}

/// File contents as a byte stream that owns the file it reads.
///
/// Releases the file at end of stream or on the first read error. Dropping
/// the stream early (client disconnect) releases it through the file's own
/// `Drop`.
struct TempFileStream {
    inner: ReaderStream<tokio::fs::File>,
    file: TempAudioFile,
}

impl TempFileStream {
    fn new(reader: tokio::fs::File, file: TempAudioFile) -> Self {
        Self {
            inner: ReaderStream::new(reader),
            file,
        }
    }
}

impl Stream for TempFileStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(None) => {
                this.file.release_quietly();
                Poll::Ready(None)
            }
            Poll::Ready(Some(Err(e))) => {
                warn!(path = %this.file.path().display(), "Failed reading temporary audio file: {e}");
                this.file.release_quietly();
                Poll::Ready(Some(Err(e)))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;
    use tempfile::TempDir;

    use super::*;
    use crate::core::language::{LanguageCatalog, LanguageResolver, LanguageTag};
    use crate::core::tts::{AUDIO_MPEG, SynthesisResult};
    use crate::core::SynthesisRequest;

    fn outcome(bytes: &'static [u8]) -> SpeechOutcome {
        let catalog = std::sync::Arc::new(LanguageCatalog::builtin().clone());
        let resolver = LanguageResolver::new(catalog, "en").unwrap();
        let tag = LanguageTag::new("kn-IN");
        let resolution = resolver.resolve_detailed(&tag);
        SpeechOutcome {
            request: SynthesisRequest {
                text: "Hello".to_string(),
                tag,
            },
            result: SynthesisResult {
                bytes: Bytes::from_static(bytes),
                mime_type: AUDIO_MPEG,
                code_used: resolution.code.clone(),
                elapsed: Duration::from_millis(42),
            },
            resolution,
            voice: "Kannada (Google)".to_string(),
        }
    }

    fn store() -> (TempDir, TempAudioStore) {
        let dir = TempDir::new().unwrap();
        let store = TempAudioStore::new(Some(dir.path().to_path_buf())).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_direct_bytes_headers() {
        let (_dir, store) = store();
        let response = dispatch(outcome(b"ID3abc"), DeliveryMode::DirectBytes, &store).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "audio/mpeg");
        assert_eq!(headers[header::CONTENT_LENGTH], "6");
        assert_eq!(headers[&X_TTS_LANGUAGE], "kn");
        assert_eq!(headers[&X_TTS_DURATION], "42");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ID3abc");
        assert_eq!(store.stats().created, 0);
    }

    #[tokio::test]
    async fn test_file_backed_releases_after_full_read() {
        let (dir, store) = store();
        let response = dispatch(outcome(b"ID3file"), DeliveryMode::FileBacked, &store).await;

        assert_eq!(response.headers()[header::CONTENT_LENGTH], "7");
        assert_eq!(store.stats().created, 1);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ID3file");

        let stats = store.stats();
        assert_eq!(stats.released, 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_file_backed_releases_when_body_dropped_unread() {
        let (dir, store) = store();
        let response = dispatch(outcome(b"ID3file"), DeliveryMode::FileBacked, &store).await;
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        drop(response);

        assert_eq!(store.stats().outstanding(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_file_backed_releases_when_client_stops_midway() {
        let (_dir, store) = store();
        let response = dispatch(outcome(b"ID3file"), DeliveryMode::FileBacked, &store).await;

        let mut stream = response.into_body().into_data_stream();
        let first = stream.next().await;
        assert!(first.is_some());
        drop(stream);

        let stats = store.stats();
        assert_eq!(stats.created, stats.released);
    }

    #[tokio::test]
    async fn test_json_envelope_shape() {
        let (_dir, store) = store();
        let response = dispatch(outcome(b"ID3"), DeliveryMode::JsonEnvelope, &store).await;

        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "audio": "SUQz",
                "voice": "Kannada (Google)",
                "language": "kn-IN",
                "code": "kn",
                "text": "Hello",
            })
        );
    }
}
