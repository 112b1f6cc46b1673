use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::core::ResourceStats;
use crate::state::AppState;

/// Health check body
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[cfg_attr(feature = "openapi", schema(example = "healthy"))]
    pub status: String,
    pub version: String,
    pub engine: String,
    pub supported_languages: Vec<String>,
    pub catalog_version: String,
    pub resources: ResourceStats,
}

/// Supported codes and the tag aliases that map onto them
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LanguagesResponse {
    pub supported: Vec<String>,
    pub aliases: BTreeMap<String, String>,
    pub default: String,
    pub fallback: String,
    pub version: String,
}

/// Health check handler
///
/// Also reports temp-file counters so leaks show up without a debugger.
#[cfg_attr(
    feature = "openapi",
    utoipa::path(
        get,
        path = "/health",
        responses((status = 200, description = "Server is running", body = HealthResponse)),
        tag = "health"
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let catalog = state.catalog();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: state.service().gateway().engine_name().to_string(),
        supported_languages: catalog.supported_codes(),
        catalog_version: catalog.version().to_string(),
        resources: state.temp_store().stats(),
    })
}

#[cfg_attr(
    feature = "openapi",
    utoipa::path(
        get,
        path = "/languages",
        responses((status = 200, description = "Supported languages and aliases", body = LanguagesResponse)),
        tag = "languages"
    )
)]
pub async fn list_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    let catalog = state.catalog();
    let service = state.service();
    Json(LanguagesResponse {
        supported: catalog.supported_codes(),
        aliases: catalog.aliases().clone(),
        default: service.validator().default_tag().to_string(),
        fallback: service.resolver().fallback().to_string(),
        version: catalog.version().to_string(),
    })
}
