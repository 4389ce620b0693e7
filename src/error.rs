use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    GatewayDisabled,
    BadRequest(&'static str),
    Upstream(&'static str),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::GatewayDisabled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match *self {
            AppError::GatewayDisabled => "no gateway connected",
            AppError::BadRequest(msg) => msg,
            AppError::Upstream(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({ "error_msg": self.message() });
        (self.status(), Json(body)).into_response()
    }
}
