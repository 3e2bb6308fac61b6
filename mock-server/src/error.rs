use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid type code: {0}")]
    InvalidTypeCode(String),

    #[error("Invalid path: must be absolute path")]
    RelativePathNotAllowed,

    #[error("Duplicate document number: {0}")]
    DuplicateDocumentNumber(String),

    #[error("{0}")]
    Validation(String),
}

impl BackendError {
    pub fn status(&self) -> StatusCode {
        match self {
            BackendError::DocumentNotFound(_) | BackendError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BackendError::DuplicateDocumentNumber(_) => StatusCode::CONFLICT,
            BackendError::InvalidTypeCode(_)
            | BackendError::RelativePathNotAllowed
            | BackendError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error bodies are `{"message": "..."}`.
impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "request rejected");
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
