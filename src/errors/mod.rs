// Defines the service error type and a result type alias using the thiserror crate.
use thiserror::Error;

pub mod response;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid id")]
    InvalidIdFormat,

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Pro plan is already activated.")]
    AlreadyPro,

    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),

    /// Malformed or incomplete JSON request body.
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Todo not found")]
    TodoNotFound,

    #[error("Todo limit exceeded for current user plan")]
    TodoLimitExceeded,
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidPayload(rejection.body_text())
    }
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
