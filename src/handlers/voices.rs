use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::core::language::VoiceProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VoicesResponse {
    /// Voice per supported code
    pub voices: BTreeMap<String, VoiceProfile>,
    pub total: usize,
}

/// Handler for GET /voices
#[cfg_attr(
    feature = "openapi",
    utoipa::path(
        get,
        path = "/voices",
        responses((status = 200, description = "Voice for every supported language", body = VoicesResponse)),
        tag = "voices"
    )
)]
pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    let voices = state.catalog().voices().clone();
    Json(VoicesResponse {
        total: voices.len(),
        voices,
    })
}
