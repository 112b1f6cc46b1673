//! # Google Translate engine tests
//!
//! Runs the engine against a local `wiremock` server standing in for
//! `translate.google.<tld>`, so no network access is needed.

use std::sync::Arc;
use std::time::Duration;

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

use speechgate::core::language::{LanguageCatalog, NormalizedCode};
use speechgate::core::tts::{EngineError, GoogleTranslateEngine, SpeechEngine, SynthesisGateway};

fn catalog() -> Arc<LanguageCatalog> {
    Arc::new(LanguageCatalog::builtin().clone())
}

fn code(catalog: &LanguageCatalog, code: &str) -> NormalizedCode {
    catalog.supported_code(code).unwrap()
}

async fn engine_for(server: &MockServer) -> (GoogleTranslateEngine, Arc<LanguageCatalog>) {
    let catalog = catalog();
    let engine = GoogleTranslateEngine::new(catalog.clone(), Some(server.uri())).unwrap();
    (engine, catalog)
}

#[tokio::test]
async fn test_single_chunk_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("ie", "UTF-8"))
        .and(query_param("client", "tw-ob"))
        .and(query_param("tl", "kn"))
        .and(query_param("q", "ನಮಸ್ಕಾರ"))
        .and(query_param("total", "1"))
        .and(query_param("idx", "0"))
        .and(header("referer", "https://translate.google.com/"))
        .and(header("accept", "audio/mpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3kannada".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let (engine, catalog) = engine_for(&server).await;
    let audio = engine
        .synthesize("ನಮಸ್ಕಾರ", &code(&catalog, "kn"))
        .await
        .unwrap();

    assert_eq!(&audio[..], b"ID3kannada");
}

#[tokio::test]
async fn test_long_text_is_chunked_and_concatenated_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "0"))
        .and(query_param("total", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first-".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "1"))
        .and(query_param("total", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"second".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let sentence = "word ".repeat(12);
    let text = format!("{}. {}.", sentence.trim(), sentence.trim());
    assert!(text.chars().count() > 100);

    let (engine, catalog) = engine_for(&server).await;
    let audio = engine.synthesize(&text, &code(&catalog, "en")).await.unwrap();

    assert_eq!(&audio[..], b"first-second");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let (engine, catalog) = engine_for(&server).await;
    let err = engine
        .synthesize("Hello", &code(&catalog, "en"))
        .await
        .unwrap_err();

    match err {
        EngineError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_audio_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (engine, catalog) = engine_for(&server).await;
    let err = engine
        .synthesize("Hello", &code(&catalog, "en"))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::EmptyAudio));
}

#[tokio::test]
async fn test_unreachable_engine_is_a_request_error() {
    // Nothing listens on port 1
    let catalog = catalog();
    let engine =
        GoogleTranslateEngine::new(catalog.clone(), Some("http://127.0.0.1:1".to_string()))
            .unwrap();
    let err = engine
        .synthesize("Hello", &code(&catalog, "en"))
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::Request(_)));
}

#[tokio::test]
async fn test_gateway_bounds_slow_engine() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"late".to_vec())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (engine, catalog) = engine_for(&server).await;
    let gateway = SynthesisGateway::new(Arc::new(engine), Duration::from_secs(1));
    let err = gateway
        .synthesize("Hello", &code(&catalog, "en"))
        .await
        .unwrap_err();

    assert_eq!(err.message, "Speech synthesis timed out after 1s");
}

#[tokio::test]
async fn test_gateway_wraps_engine_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let (engine, catalog) = engine_for(&server).await;
    let gateway = SynthesisGateway::new(Arc::new(engine), Duration::from_secs(5));
    let err = gateway
        .synthesize("Hello", &code(&catalog, "en"))
        .await
        .unwrap_err();

    assert_eq!(
        err.message,
        "Speech engine returned status 429: quota exceeded"
    );
}
