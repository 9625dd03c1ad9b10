use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

/// Failures raised by the journal, its store, and the reminder task.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Entry not found: {id}")]
    NotFound { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid store file: {message}")]
    InvalidStore { message: String },

    #[error("Reminder scheduler error: {message}")]
    Scheduler { message: String },
}

pub type Result<T, E = JournalError> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Validation { message } => Self::bad_request(message),
            JournalError::NotFound { .. } => Self::not_found(err.to_string()),
            other => {
                error!("journal operation failed: {other}");
                Self::internal(other)
            }
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
