use axum::{
    response::{IntoResponse, Response, Json},
    http::StatusCode,
};
use serde_json::json;
use crate::errors::AppError;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Malformed input and rejected state transitions are bad requests
            AppError::InvalidIdFormat
            | AppError::DuplicateUsername
            | AppError::AlreadyPro
            | AppError::InvalidDeadline(_)
            | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,

            AppError::UserNotFound | AppError::TodoNotFound => StatusCode::NOT_FOUND,

            // Plan limits are a permission problem, not a malformed request
            AppError::TodoLimitExceeded => StatusCode::FORBIDDEN,
        }
    }
}

// The IntoResponse trait implementation converts AppError into a `{"error": ...}` JSON response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!("Request failed with {}: {}", status, self);

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
