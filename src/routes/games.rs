use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let gateway = state.gateway.as_ref().ok_or(AppError::GatewayDisabled)?;

    let resp = gateway.list_applications().await.map_err(|e| {
        tracing::warn!("application listing failed: {e}");
        AppError::Upstream("failed to communicate with gateway")
    })?;

    if !resp.has_status(200) {
        tracing::warn!(status = ?resp.status_code, "unexpected gateway status");
        return Err(AppError::Upstream("failed to communicate with gateway"));
    }

    let names = resp
        .application_names()
        .ok_or(AppError::Upstream("received invalid response from gateway"))?;
    Ok(Json(names))
}
