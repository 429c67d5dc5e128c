use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Validation rejections carry their reason verbatim so the caller can
/// correct and resubmit; internal failures are collapsed to a generic body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Engine(EngineError::AccountNotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Account not found: {}", id))
            }
            AppError::Engine(EngineError::Trade(trade_err)) => {
                // All validation rejections are terminal for the request and
                // fixable by the caller.
                (StatusCode::UNPROCESSABLE_ENTITY, trade_err.to_string())
            }
            AppError::Engine(engine_err) => {
                tracing::error!(error = ?engine_err, "Engine error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
