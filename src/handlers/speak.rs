use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use tracing::info;

use crate::core::{DeliveryMode, SpeakRequest};
use crate::errors::app_error::{AppError, AppResult};
use crate::handlers::delivery::dispatch;
use crate::state::AppState;

async fn synthesize(
    state: &AppState,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
    mode: DeliveryMode,
) -> AppResult<Response> {
    let Json(request) =
        payload.map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e.body_text())))?;

    info!(
        mode = %mode,
        language = request.language.as_deref().unwrap_or("<default>"),
        "Speech request received"
    );

    let outcome = state.service().speak(request).await?;
    Ok(dispatch(outcome, mode, state.temp_store()).await)
}

/// Handler for POST /tts; answers in the configured delivery mode
#[cfg_attr(
    feature = "openapi",
    utoipa::path(
        post,
        path = "/tts",
        request_body = SpeakRequest,
        responses(
            (status = 200, description = "Audio generated (audio/mpeg, or JSON envelope when so configured)",
                content_type = "audio/mpeg",
                headers(
                    ("x-tts-language" = String, description = "Engine code used"),
                    ("x-tts-duration" = u64, description = "Engine time in milliseconds")
                )
            ),
            (status = 400, description = "Empty text or malformed body"),
            (status = 500, description = "Speech synthesis failed")
        ),
        tag = "tts"
    )
)]
pub async fn tts_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> AppResult<Response> {
    let mode = state.config.delivery_mode;
    synthesize(&state, payload, mode).await
}

/// Handler for POST /tts/stream; audio is streamed from a temporary file
#[cfg_attr(
    feature = "openapi",
    utoipa::path(
        post,
        path = "/tts/stream",
        request_body = SpeakRequest,
        responses(
            (status = 200, description = "Audio streamed from disk", content_type = "audio/mpeg"),
            (status = 400, description = "Empty text or malformed body"),
            (status = 500, description = "Speech synthesis failed")
        ),
        tag = "tts"
    )
)]
pub async fn tts_stream_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> AppResult<Response> {
    synthesize(&state, payload, DeliveryMode::FileBacked).await
}

/// Handler for POST /speak; audio is returned base64-encoded in JSON
#[cfg_attr(
    feature = "openapi",
    utoipa::path(
        post,
        path = "/speak",
        request_body = SpeakRequest,
        responses(
            (status = 200, description = "Audio generated", body = crate::handlers::delivery::SpeechEnvelope),
            (status = 400, description = "Empty text or malformed body"),
            (status = 500, description = "Speech synthesis failed")
        ),
        tag = "tts"
    )
)]
pub async fn speak_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> AppResult<Response> {
    synthesize(&state, payload, DeliveryMode::JsonEnvelope).await
}

/// Handler for POST /api/tts; always answers with raw bytes
pub async fn api_tts_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> AppResult<Response> {
    synthesize(&state, payload, DeliveryMode::DirectBytes).await
}
