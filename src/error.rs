use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    /// Required upstream configuration is absent. The message is user-facing.
    Config(String),
    /// An upstream dependency failed. Carries a user-facing message; detail
    /// goes to the log only.
    Upstream { message: String, detail: String },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Missing Configuration: {msg}"),
            AppError::Upstream { detail, .. } => write!(f, "Upstream Error: {detail}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Config(msg) => {
                tracing::error!("Missing configuration: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Upstream { message, detail } => {
                tracing::error!("Upstream error: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
