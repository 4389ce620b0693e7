use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::gateway::SessionRequest;
use crate::state::AppState;

pub async fn create_session(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let gateway = state.gateway.as_ref().ok_or(AppError::GatewayDisabled)?;

    let Json(body) = body.map_err(|_| AppError::BadRequest("invalid input"))?;
    let input = body
        .as_object()
        .filter(|fields| !fields.is_empty())
        .ok_or(AppError::BadRequest("invalid input"))?;

    let game = input
        .get("game")
        .and_then(Value::as_str)
        .filter(|game| !game.is_empty())
        .ok_or(AppError::BadRequest("invalid game selected"))?;

    let session = SessionRequest::for_app(game);
    let resp = gateway.create_session(&session).await.map_err(|e| {
        tracing::warn!("session creation failed: {e}");
        AppError::Upstream("failed to create session")
    })?;

    if !resp.has_status(201) {
        tracing::warn!(status = ?resp.status_code, "gateway refused session");
        return Err(AppError::Upstream("failed to create session"));
    }

    let metadata = resp
        .metadata
        .ok_or(AppError::Upstream("failed to create session"))?;
    Ok(Json(metadata))
}
