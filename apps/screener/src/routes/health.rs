use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and whether the semantic judge is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let judge = state.screener.judge();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-screener",
        "judge": {
            "backend": judge.backend_name(),
            "available": judge.is_available()
        }
    }))
}
