use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and active backends.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-api",
        "storage": state.storage.backend(),
        "scoring": state.cv_scorer.backend(),
        "llm_enrichment": state.config.gemini_api_key.is_some(),
    }))
}
