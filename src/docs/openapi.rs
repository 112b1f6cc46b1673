//! OpenAPI specification and documentation
//!
//! Only compiled when the `openapi` feature is enabled.

use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use crate::core::language::VoiceProfile;
use crate::core::{ResourceStats, SpeakRequest};
use crate::handlers::{
    api::{HealthResponse, LanguagesResponse},
    delivery::SpeechEnvelope,
    voices::VoicesResponse,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Speechgate API",
        version = "0.1.0",
        description = "Speech synthesis gateway: resolves loose language tags and delivers MP3 audio"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development")
    ),
    paths(
        crate::handlers::api::health_check,
        crate::handlers::api::list_languages,
        crate::handlers::voices::list_voices,
        crate::handlers::speak::tts_handler,
        crate::handlers::speak::tts_stream_handler,
        crate::handlers::speak::speak_handler,
    ),
    components(schemas(
        HealthResponse,
        ResourceStats,
        LanguagesResponse,
        VoicesResponse,
        VoiceProfile,
        SpeakRequest,
        SpeechEnvelope,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "languages", description = "Supported languages and aliases"),
        (name = "voices", description = "Voice per supported language"),
        (name = "tts", description = "Text-to-speech synthesis")
    )
)]
pub struct ApiDoc;

/// Routes serving the spec:
/// - `GET /docs/openapi.json`
/// - `GET /docs/openapi.yaml`
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/docs/openapi.json", get(openapi_json_handler))
        .route("/docs/openapi.yaml", get(openapi_yaml_handler))
}

async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn openapi_yaml_handler() -> ([(axum::http::header::HeaderName, &'static str); 1], String) {
    let yaml = spec_yaml().unwrap_or_else(|e| format!("Error generating YAML: {e}"));
    ([(axum::http::header::CONTENT_TYPE, "application/yaml")], yaml)
}

/// OpenAPI spec as YAML, used by the `openapi` CLI command
pub fn spec_yaml() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&ApiDoc::openapi())
}

pub fn spec_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ApiDoc::openapi())
}
