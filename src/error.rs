use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::warning;

/// Failures a relay request can end in, mapped onto HTTP responses.
///
/// Every variant renders as a JSON object with at least an `error` key.
/// Upstream bodies are carried verbatim under `details`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{error}")]
    Rejected { error: String, details: Value },

    #[error("Spotify API responded with {status}")]
    Upstream { status: u16, details: Value },

    #[error("Spotify API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Rejected { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } | ApiError::Transport(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::BadRequest(message) => json!({ "error": message }),
            ApiError::Rejected { error, details } => json!({
                "error": error,
                "details": details,
            }),
            ApiError::Upstream { status, details } => json!({
                "error": "Spotify API request failed",
                "status": status,
                "details": details,
            }),
            ApiError::Transport(e) => {
                let error = if e.is_timeout() {
                    "Spotify API request timed out"
                } else {
                    "Spotify API unreachable"
                };
                json!({ "error": error, "details": e.to_string() })
            }
            // details stay in the log
            ApiError::Internal(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warning!("Request failed with {}: {}", status, self);
        }
        (status, Json(self.body())).into_response()
    }
}
