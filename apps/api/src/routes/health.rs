use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Plain-text liveness string naming the active mode.
pub async fn root_handler(State(state): State<AppState>) -> String {
    let mode = if state.config.development_mode {
        "Development Mode (simulated collaborators)"
    } else {
        "Production Mode"
    };
    format!("AI Interview Screener Backend OK - {mode}")
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screener-api"
    }))
}
