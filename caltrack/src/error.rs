use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaltrackError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The LLM credential is missing or malformed. The caller has to fix
    /// their settings before estimation can work.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The upstream endpoint rejected the credential (401/403).
    #[error("LLM authentication error: {0}")]
    LlmAuth(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    /// Transport-level failure reaching the LLM endpoint.
    #[error("LLM connection error: {0}")]
    LlmConnection(String),

    /// Any other upstream LLM failure; carries the upstream message when
    /// one was available.
    #[error("LLM error: {0}")]
    Llm(String),

    /// The completion succeeded but no usable calorie count could be
    /// extracted (no number found, or an explicit zero).
    #[error("Ambiguous estimate: {0}")]
    AmbiguousEstimate(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for CaltrackError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CaltrackError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CaltrackError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CaltrackError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            CaltrackError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            CaltrackError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            CaltrackError::Credential(msg) => (StatusCode::PRECONDITION_FAILED, msg.clone()),
            CaltrackError::LlmAuth(msg) => (StatusCode::PRECONDITION_FAILED, msg.clone()),
            CaltrackError::LlmRateLimit { .. } => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            CaltrackError::LlmConnection(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CaltrackError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CaltrackError::AmbiguousEstimate(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            CaltrackError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CaltrackError>;
