//! Server error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use user_store::UserStoreError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("{0}")]
    InvalidRequest(String),

    /// Storage error.
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

/// The single translation layer from error kinds to HTTP responses.
///
/// Every failure carries a flat `{"error": <message>}` body. A missing row
/// is a 404 with a fixed short message; any other storage failure surfaces
/// its text in a 500.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Store(e) if e.is_not_found() => {
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            ServerError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
