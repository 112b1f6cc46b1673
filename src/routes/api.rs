use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::delivery::{X_TTS_DURATION, X_TTS_LANGUAGE};
use crate::handlers::{api, speak, voices};
use crate::state::AppState;

const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/health", get(api::health_check))
        .route("/languages", get(api::list_languages))
        .route("/voices", get(voices::list_voices))
        .route("/tts", post(speak::tts_handler))
        .route("/tts/stream", post(speak::tts_stream_handler))
        .route("/speak", post(speak::speak_handler))
        // Serverless-style surface
        .route(
            "/api/tts",
            get(api::health_check).post(speak::api_tts_handler),
        )
        .layer(TraceLayer::new_for_http())
}

/// All origins; preflight answered by the layer itself
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([X_TTS_LANGUAGE, X_TTS_DURATION])
        .max_age(CORS_MAX_AGE)
}

/// Complete application router with state applied
pub fn create_app(state: Arc<AppState>) -> Router {
    let router = create_api_router();

    #[cfg(feature = "openapi")]
    let router = router.merge(crate::docs::openapi::router());

    let router = if state.config.cors_enabled {
        router.layer(cors_layer())
    } else {
        router
    };

    router.with_state(state)
}
