use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure talking to OpenAlex.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to OpenAlex failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OpenAlex answered {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "upstream request failed");
        let status = match &self {
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
