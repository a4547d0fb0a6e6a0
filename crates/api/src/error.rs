use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Request-level failures surfaced to the caller. Graph-store problems never
/// appear here; they degrade to sentinel text inside the profile retriever.
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("No input query found in expected formats (e.g., \"inputText\" or \"body.query\").")]
    MissingQuery,

    #[error("Input query is empty.")]
    EmptyQuery,

    #[error("Internal Server Error in RAG: {0}")]
    Internal(String),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = match &self {
            RequestError::MissingQuery | RequestError::EmptyQuery => StatusCode::BAD_REQUEST,
            RequestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
