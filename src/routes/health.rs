use axum::extract::State;
use axum::Json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let gateway = if state.gateway.is_some() {
        "configured"
    } else {
        "disabled"
    };
    Json(serde_json::json!({ "status": "ok", "gateway": gateway }))
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "git_sha": env!("GIT_SHA"),
    }))
}
